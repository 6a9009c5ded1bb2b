//! Structured language-model output.

use serde::{Deserialize, Serialize};

/// Number of image prompts requested from the language model.
pub const DEFAULT_PROMPT_COUNT: usize = 3;

/// Narration script, caption and image prompts for one video.
///
/// # Examples
///
/// ```
/// use factreel_core::ScriptBundle;
///
/// let bundle: ScriptBundle = serde_json::from_str(
///     r#"{"script": "Did you know...", "caption": "Fact!", "prompts": ["a", "b", "c"]}"#,
/// ).unwrap();
/// assert!(bundle.validate(3).is_ok());
/// assert!(bundle.validate(4).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptBundle {
    /// Text the narrator reads
    pub script: String,
    /// Caption posted alongside the video
    pub caption: String,
    /// Image prompts, in display order
    pub prompts: Vec<String>,
}

impl ScriptBundle {
    /// JSON schema describing this shape, for structured-output requests.
    ///
    /// The schema pins `prompts` to exactly `prompt_count` entries.
    pub fn json_schema(prompt_count: usize) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "script": { "type": "string" },
                "caption": { "type": "string" },
                "prompts": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": prompt_count,
                    "maxItems": prompt_count
                }
            },
            "required": ["script", "caption", "prompts"],
            "additionalProperties": false
        })
    }

    /// Validates the prompt list length and that no field is blank.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self, expected: usize) -> Result<(), String> {
        if self.prompts.len() != expected {
            return Err(format!(
                "expected {} image prompts, got {}",
                expected,
                self.prompts.len()
            ));
        }
        if self.script.trim().is_empty() {
            return Err("script is empty".to_string());
        }
        if let Some(position) = self.prompts.iter().position(|p| p.trim().is_empty()) {
            return Err(format!("prompt {} is empty", position + 1));
        }
        Ok(())
    }
}
