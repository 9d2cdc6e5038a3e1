use serde::{Deserialize, Serialize};

/// One camera angle: a display label and the instruction sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    pub label: String,
    pub directive: String,
}

impl ViewSpec {
    pub fn new(label: impl Into<String>, directive: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            directive: directive.into(),
        }
    }
}
