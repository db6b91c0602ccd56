use serde::{Deserialize, Serialize};

/// Search mode hint sent with a chat request.
///
/// Narrows the backend's intent resolution to one vertical. A request that
/// omits the mode asks the backend to auto-detect intent from the message
/// text, so parsing an unknown hint yields `None` rather than a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Flight,
    Hotel,
    Trip,
}

impl Mode {
    /// Every mode, in the order the connectivity check probes them.
    pub const ALL: [Mode; 3] = [Mode::Flight, Mode::Hotel, Mode::Trip];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Flight => "flight",
            Mode::Hotel => "hotel",
            Mode::Trip => "trip",
        }
    }

    /// Parse a mode as the backend spells it. Tolerates case and plural
    /// variants; anything else means "no hint".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "flight" | "flights" => Some(Mode::Flight),
            "hotel" | "hotels" => Some(Mode::Hotel),
            "trip" | "trips" => Some(Mode::Trip),
            _ => None,
        }
    }
}

/// The mode a UI preselects before the user picks one.
impl Default for Mode {
    fn default() -> Self {
        Mode::Trip
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
