use serde::{Deserialize, Serialize};

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn in a conversation.
///
/// Turns are immutable once constructed and travel oldest-first when
/// carried in a request history. Wire shape: `{"role": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_set_the_role() {
        assert_eq!(Message::user("hi").role(), Role::User);
        assert_eq!(Message::assistant("hello").role(), Role::Assistant);
    }

    #[test]
    fn wire_shape_matches_the_backend_contract() {
        let turn = Message::user("Find hotels in Mecca");
        assert_eq!(
            serde_json::to_value(&turn).expect("serialize"),
            json!({"role": "user", "content": "Find hotels in Mecca"})
        );
    }

    #[test]
    fn roles_round_trip_through_their_wire_spelling() {
        let turn: Message =
            serde_json::from_value(json!({"role": "assistant", "content": "Welcome"}))
                .expect("deserialize");
        assert_eq!(turn.role(), Role::Assistant);
        assert_eq!(turn.content(), "Welcome");
    }
}
