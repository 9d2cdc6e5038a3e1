use crate::{
    error::{Result, ViewGenError},
    models::EncodedImage,
};
use serde::{Deserialize, Serialize};

pub const ALL_FAILED_REASON: &str = "all view generation requests failed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeResult {
    Success { image: EncodedImage },
    Failure { reason: String },
}

/// How one view of a batch settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Position of the view in the catalog.
    pub index: usize,
    pub label: String,
    pub result: OutcomeResult,
}

impl GenerationOutcome {
    pub fn success(index: usize, label: impl Into<String>, image: EncodedImage) -> Self {
        Self {
            index,
            label: label.into(),
            result: OutcomeResult::Success { image },
        }
    }

    pub fn failure(index: usize, label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            result: OutcomeResult::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.result, OutcomeResult::Success { .. })
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        match &self.result {
            OutcomeResult::Success { image } => Some(image),
            OutcomeResult::Failure { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.result {
            OutcomeResult::Success { .. } => None,
            OutcomeResult::Failure { reason } => Some(reason),
        }
    }
}

/// Every outcome of one batch, in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: String,
    pub outcomes: Vec<GenerationOutcome>,
}

impl BatchReport {
    pub fn new(batch_id: impl Into<String>, mut outcomes: Vec<GenerationOutcome>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.index);
        Self {
            batch_id: batch_id.into(),
            outcomes,
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn successes(&self) -> impl Iterator<Item = &GenerationOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &GenerationOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    /// Successful images paired with the label of the view that produced them.
    pub fn labeled_images(&self) -> Vec<(&str, &EncodedImage)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.image().map(|image| (outcome.label.as_str(), image)))
            .collect()
    }

    /// Collapses the report to the caller-facing result.
    ///
    /// Any success wins and failures are dropped without a trace. With no
    /// success at all, the first failure in catalog order becomes the error.
    pub fn into_result(self) -> Result<Vec<EncodedImage>> {
        let mut images = Vec::new();
        let mut first_reason = None;

        for outcome in self.outcomes {
            match outcome.result {
                OutcomeResult::Success { image } => images.push(image),
                OutcomeResult::Failure { reason } => {
                    if first_reason.is_none() && !reason.is_empty() {
                        first_reason = Some(reason);
                    }
                }
            }
        }

        if images.is_empty() {
            return Err(ViewGenError::AllViewsFailed(
                first_reason.unwrap_or_else(|| ALL_FAILED_REASON.to_string()),
            ));
        }

        Ok(images)
    }
}
