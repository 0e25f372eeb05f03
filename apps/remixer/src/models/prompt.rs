use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::remix::prompts::DEFAULT_INSTRUCTION;

/// Id of the built-in prompt. Never persisted, never deletable.
pub const DEFAULT_PROMPT_ID: &str = "default";

/// A named, reusable remix instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl Prompt {
    /// Creates a user prompt with a fresh random id.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// The built-in prompt carrying the default instruction.
    pub fn builtin() -> Self {
        Self {
            id: DEFAULT_PROMPT_ID.to_string(),
            name: "Default".to_string(),
            content: DEFAULT_INSTRUCTION.to_string(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.id == DEFAULT_PROMPT_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_prompts_get_distinct_ids() {
        let a = Prompt::new("Formal", "Rewrite formally:");
        let b = Prompt::new("Formal", "Rewrite formally:");
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, DEFAULT_PROMPT_ID);
        assert!(!a.is_builtin());
    }

    #[test]
    fn test_serializes_as_id_name_content() {
        let prompt = Prompt {
            id: "1".to_string(),
            name: "Pirate".to_string(),
            content: "Talk like a pirate:".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&prompt).unwrap(),
            r#"{"id":"1","name":"Pirate","content":"Talk like a pirate:"}"#
        );
    }
}
