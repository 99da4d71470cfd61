use serde::{Deserialize, Serialize};

/// Sentinel identifier a slot sends when it delegates model selection to
/// the server.
pub const AUTO_MODEL: &str = "openrouter/auto";

/// One selectable entry in the model dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub value: String,
    pub label: String,
}

impl ModelOption {
    fn new(value: &str, label: &str) -> Self {
        ModelOption {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// The static model catalog offered for selection.
///
/// Used only to populate selection controls and to translate a resolved
/// identifier back to a human label; the engine does not depend on this
/// list being complete or current.
pub fn available_models() -> Vec<ModelOption> {
    vec![
        ModelOption::new("gpt-4", "GPT-4"),
        ModelOption::new("gpt-3.5-turbo", "GPT-3.5 Turbo"),
        ModelOption::new("claude-3", "Claude 3"),
        ModelOption::new("yellowcake", "YellowCake API (For Automation)"),
        ModelOption::new("llama-2", "Llama 2"),
        ModelOption::new("gemini", "Gemini"),
        ModelOption::new(AUTO_MODEL, "Auto (server decides)"),
    ]
}

/// Human label for a model identifier, falling back to the identifier
/// itself for models the catalog does not know (e.g. auto-resolved ones).
pub fn label_for(value: &str) -> String {
    available_models()
        .into_iter()
        .find(|option| option.value == value)
        .map(|option| option.label)
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_auto_sentinel() {
        assert!(available_models()
            .iter()
            .any(|option| option.value == AUTO_MODEL));
    }

    #[test]
    fn label_for_known_model() {
        assert_eq!(label_for("gpt-4"), "GPT-4");
    }

    #[test]
    fn label_for_unknown_model_falls_back_to_value() {
        assert_eq!(label_for("mistral-7b"), "mistral-7b");
    }
}
