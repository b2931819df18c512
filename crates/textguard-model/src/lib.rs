//! TextGuard Model
//!
//! The model-acquisition-and-inference pipeline:
//! - [`ModelProvisioner`] resolves a ready-to-use model handle exactly once
//!   per process, from a local directory or a remote ZIP archive
//! - [`SpamClassifier`] maps one text through the loaded model to a
//!   [`ClassificationResult`](textguard_core::ClassificationResult)
//!
//! All inference runs on CPU by default and the loaded handle is safe to
//! share read-only across concurrent calls.

pub mod classifier;
pub mod model;
pub mod provisioner;
pub mod source;

pub use classifier::{SpamClassifier, SpamModel};
pub use model::{BertSpamModel, DeviceType};
pub use provisioner::ModelProvisioner;
pub use source::ModelSource;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{SpamClassifier, SpamModel};
    pub use crate::model::{BertSpamModel, DeviceType};
    pub use crate::provisioner::ModelProvisioner;
    pub use crate::source::ModelSource;
    pub use textguard_core::{ClassificationResult, Error, Result};
}
