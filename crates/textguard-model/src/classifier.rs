//! Inference service: one text in, one classification out

use crate::model::BertSpamModel;
use async_trait::async_trait;
use std::sync::Arc;
use textguard_core::{ClassificationResult, Result};

/// A binary classifier backend producing one raw logit per text.
///
/// Implemented by [`BertSpamModel`]; test code supplies mock
/// implementations.
#[async_trait]
pub trait SpamModel: Send + Sync {
    /// Forward pass over a length-1 batch containing `text`.
    async fn forward_logit(&self, text: &str) -> Result<f32>;

    /// Model identifier for logs and status reporting.
    fn name(&self) -> &str;
}

#[async_trait]
impl SpamModel for BertSpamModel {
    async fn forward_logit(&self, text: &str) -> Result<f32> {
        BertSpamModel::forward_logit(self, text)
    }

    fn name(&self) -> &str {
        BertSpamModel::name(self)
    }
}

/// The inference service: maps one text through a loaded model to a
/// [`ClassificationResult`].
///
/// Stateless between calls; classifying the same text against the same
/// model twice yields identical results.
pub struct SpamClassifier {
    model: Arc<dyn SpamModel>,
}

impl SpamClassifier {
    pub fn new(model: Arc<dyn SpamModel>) -> Self {
        Self { model }
    }

    /// Classify `text`.
    ///
    /// Empty or whitespace-only input returns `Ok(None)` without invoking
    /// the model; inference on empty text has no meaningful semantics for
    /// this classifier. Model invocation failures surface as
    /// [`Error::Inference`](textguard_core::Error::Inference) and are not
    /// retried.
    pub async fn classify(&self, text: &str) -> Result<Option<ClassificationResult>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let logit = self.model.forward_logit(text).await?;
        Ok(Some(ClassificationResult::from_logit(logit)))
    }

    /// Name of the underlying model.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}
