//! Request/response types for the demo API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use textguard_core::ClassificationResult;

/// Canned example messages shown in the UI.
pub const EXAMPLE_MESSAGES: [&str; 4] = [
    "Congratulations! You've won a $1000 gift card. Click here to claim now!",
    "Meeting rescheduled to 3pm tomorrow",
    "URGENT: Your bank account has been suspended. Verify now:",
    "Don't forget to pick up milk on your way home",
];

const PREVIEW_LENGTH: usize = 80;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// `result` is `null` when the input was empty or whitespace-only; no model
/// call was made in that case.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub result: Option<ClassificationResult>,
    pub model: String,
}

/// One past classification, kept in the in-memory history.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub preview: String,
    pub result: ClassificationResult,
}

impl ClassificationRecord {
    pub fn new(text: &str, result: ClassificationResult) -> Self {
        let mut preview: String = text.chars().take(PREVIEW_LENGTH).collect();
        if text.chars().count() > PREVIEW_LENGTH {
            preview.push('…');
        }
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            preview,
            result,
        }
    }
}
