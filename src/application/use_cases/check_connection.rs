use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{info, warn};

use crate::connector::adapter::ChatBackend;
use crate::domain::{ChatRequest, Mode};

/// Fields every chat envelope is expected to carry.  A payload missing any
/// of them fails its stage; their contents are not validated further.
const ENVELOPE_FIELDS: [&str; 4] = ["response", "session_id", "mode", "search_results"];

/// One connectivity probe per mode.
struct ModeProbe {
    name: &'static str,
    mode: Mode,
    message: &'static str,
    /// Result group this vertical normally populates, when it has one.
    /// Only affects the stage detail text, never pass/fail.
    expected_key: Option<&'static str>,
}

impl ModeProbe {
    /// The probe a mode contributes to the suite; `Mode::ALL` fixes the
    /// order they run in.
    const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Flight => ModeProbe {
                name: "Flight Mode",
                mode,
                message: "Find flights from Riyadh to Jeddah",
                expected_key: Some("flight"),
            },
            Mode::Hotel => ModeProbe {
                name: "Hotel Mode",
                mode,
                message: "Find hotels in Mecca",
                expected_key: Some("hotel"),
            },
            Mode::Trip => ModeProbe {
                name: "Trip Mode",
                mode,
                message: "Plan a trip to Riyadh",
                expected_key: None,
            },
        }
    }
}

/// Outcome of a single connectivity check stage.
#[derive(Debug, Clone)]
pub struct CheckResult {
    name: String,
    passed: bool,
    detail: String,
    elapsed: Duration,
}

impl CheckResult {
    fn new(
        name: impl Into<String>,
        passed: bool,
        detail: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
            elapsed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// End-to-end connectivity suite against a live backend: one health probe
/// followed by a chat round-trip in each mode.
pub struct CheckConnectionUseCase {
    backend: Arc<dyn ChatBackend>,
}

impl CheckConnectionUseCase {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Run every stage in order.  A failing stage is recorded and the suite
    /// keeps going, so one report covers the whole surface.
    pub async fn execute(&self) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(1 + Mode::ALL.len());
        results.push(self.check_health().await);
        for mode in Mode::ALL {
            results.push(self.check_mode(ModeProbe::for_mode(mode)).await);
        }
        let passed = results.iter().filter(|r| r.passed()).count();
        info!("CheckConnection: {passed}/{} stages passed", results.len());
        results
    }

    async fn check_health(&self) -> CheckResult {
        let started = Instant::now();
        match self.backend.health_check().await {
            Ok(payload) => CheckResult::new(
                "Health Check",
                true,
                format!("backend responded: {payload}"),
                started.elapsed(),
            ),
            Err(e) => {
                warn!("CheckConnection: health check failed: {e}");
                CheckResult::new("Health Check", false, e.to_string(), started.elapsed())
            }
        }
    }

    async fn check_mode(&self, probe: ModeProbe) -> CheckResult {
        let request = ChatRequest::new(probe.message).with_mode(probe.mode);
        let started = Instant::now();
        match self.backend.send_chat_message(&request).await {
            Ok(response) => {
                let elapsed = started.elapsed();
                match validate_envelope(response.as_value(), probe.expected_key) {
                    Ok(detail) => CheckResult::new(probe.name, true, detail, elapsed),
                    Err(detail) => {
                        warn!("CheckConnection: {} failed: {detail}", probe.name);
                        CheckResult::new(probe.name, false, detail, elapsed)
                    }
                }
            }
            Err(e) => {
                warn!("CheckConnection: {} failed: {e}", probe.name);
                CheckResult::new(probe.name, false, e.to_string(), started.elapsed())
            }
        }
    }
}

fn validate_envelope(payload: &Value, expected_key: Option<&str>) -> Result<String, String> {
    for field in ENVELOPE_FIELDS {
        if payload.get(field).is_none() {
            return Err(format!("missing '{field}' field in the response envelope"));
        }
    }
    let detail = match expected_key {
        Some(key) => {
            let items = payload
                .get("search_results")
                .and_then(|results| results.get(key))
                .and_then(Value::as_array);
            match items {
                Some(items) => format!("{} {key} results", items.len()),
                None => format!("no {key} results reported"),
            }
        }
        None => "envelope complete".to_string(),
    };
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::domain::{ChatResponse, ClientError};

    /// Canned backend: health and chat outcomes are fixed per instance, with
    /// the chat payload derived from the requested mode.
    struct StubBackend {
        healthy: bool,
        chat_unreachable: bool,
        payload: fn(Option<Mode>) -> Value,
    }

    #[async_trait]
    impl ChatBackend for StubBackend {
        async fn send_chat_message(
            &self,
            request: &ChatRequest,
        ) -> Result<ChatResponse, ClientError> {
            if self.chat_unreachable {
                return Err(ClientError::NoResponse);
            }
            Ok(ChatResponse::new((self.payload)(request.mode())))
        }

        async fn health_check(&self) -> Result<Value, ClientError> {
            if self.healthy {
                Ok(json!({"status": "ok"}))
            } else {
                Err(ClientError::http(503, "Server error: 503"))
            }
        }
    }

    fn full_envelope(mode: Option<Mode>) -> Value {
        let search_results = match mode {
            Some(Mode::Flight) => json!({"flight": [{"airline": "Saudia"}, {"airline": "Flynas"}]}),
            Some(Mode::Hotel) => json!({"hotel": [{"title": "Desert Rose Hotel"}]}),
            _ => json!({}),
        };
        json!({
            "response": "Here you go",
            "session_id": "sess-1",
            "mode": mode.unwrap_or_default().as_str(),
            "search_results": search_results,
        })
    }

    fn bare_envelope(_mode: Option<Mode>) -> Value {
        json!({"response": "Hi", "session_id": "sess-1", "mode": "trip"})
    }

    fn suite(backend: StubBackend) -> CheckConnectionUseCase {
        CheckConnectionUseCase::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn all_stages_pass_with_complete_envelopes() {
        let use_case = suite(StubBackend {
            healthy: true,
            chat_unreachable: false,
            payload: full_envelope,
        });

        let results = use_case.execute().await;
        let names: Vec<&str> = results.iter().map(CheckResult::name).collect();
        assert_eq!(names, ["Health Check", "Flight Mode", "Hotel Mode", "Trip Mode"]);
        assert!(results.iter().all(CheckResult::passed));
        assert_eq!(results[1].detail(), "2 flight results");
        assert_eq!(results[2].detail(), "1 hotel results");
        assert_eq!(results[3].detail(), "envelope complete");
    }

    #[tokio::test]
    async fn failing_health_does_not_stop_mode_stages() {
        let use_case = suite(StubBackend {
            healthy: false,
            chat_unreachable: false,
            payload: full_envelope,
        });

        let results = use_case.execute().await;
        assert_eq!(results.len(), 4);
        assert!(!results[0].passed());
        assert_eq!(results[0].detail(), "Server error: 503");
        assert!(results[1..].iter().all(CheckResult::passed));
    }

    #[tokio::test]
    async fn incomplete_envelope_fails_the_stage() {
        let use_case = suite(StubBackend {
            healthy: true,
            chat_unreachable: false,
            payload: bare_envelope,
        });

        let results = use_case.execute().await;
        assert!(results[0].passed());
        for result in &results[1..] {
            assert!(!result.passed());
            assert_eq!(
                result.detail(),
                "missing 'search_results' field in the response envelope"
            );
        }
    }

    #[tokio::test]
    async fn unreachable_backend_surfaces_the_normalized_message() {
        let use_case = suite(StubBackend {
            healthy: true,
            chat_unreachable: true,
            payload: full_envelope,
        });

        let results = use_case.execute().await;
        assert!(results[0].passed());
        for result in &results[1..] {
            assert!(!result.passed());
            assert_eq!(result.detail(), ClientError::NoResponse.to_string());
        }
    }

    #[test]
    fn expected_key_only_shapes_the_detail_text() {
        let payload = json!({
            "response": "ok",
            "session_id": "s",
            "mode": "flight",
            "search_results": {}
        });
        assert_eq!(
            validate_envelope(&payload, Some("flight")),
            Ok("no flight results reported".to_string())
        );
        assert_eq!(
            validate_envelope(&payload, None),
            Ok("envelope complete".to_string())
        );
    }
}
