//! TextGuard Core
//!
//! Shared types for the TextGuard spam classifier:
//! - The error taxonomy used across model provisioning and inference
//! - The `ClassificationResult` value object and its numeric mapping

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{sigmoid, ClassificationResult};
