use crate::models::ClassificationRecord;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use textguard_model::ModelProvisioner;

const MAX_HISTORY: usize = 100;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Model provisioner; owns the memoized model handle
    pub provisioner: Arc<ModelProvisioner>,

    /// Recent classifications, newest first
    pub history: Arc<RwLock<VecDeque<ClassificationRecord>>>,
}

impl AppState {
    pub fn new(provisioner: Arc<ModelProvisioner>) -> Self {
        Self {
            provisioner,
            history: Arc::new(RwLock::new(VecDeque::with_capacity(MAX_HISTORY))),
        }
    }

    /// Add a record to history, evicting the oldest when full.
    pub fn add_record(&self, record: ClassificationRecord) {
        let mut history = self.history.write();
        history.push_front(record);
        if history.len() > MAX_HISTORY {
            history.pop_back();
        }
    }

    /// Get the most recent records.
    pub fn recent_records(&self, limit: usize) -> Vec<ClassificationRecord> {
        let history = self.history.read();
        history.iter().take(limit).cloned().collect()
    }
}
