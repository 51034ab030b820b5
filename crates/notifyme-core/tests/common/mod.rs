//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use notifyme_core::{SignupBackend, SignupError, SignupRecord, SignupResult};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// In-memory backend that counts calls and can be told to fail or stall.
#[derive(Default)]
pub struct MemoryBackend {
    records: Mutex<HashSet<String>>,
    pub created: Mutex<Vec<SignupRecord>>,
    pub lookups: AtomicUsize,
    pub creates: AtomicUsize,
    pub fail_lookup: bool,
    pub fail_create: bool,
    /// When set, `find_record` waits for a notification before answering.
    pub gate: Option<Arc<Notify>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(emails: &[&str]) -> Self {
        let backend = Self::default();
        backend
            .records
            .lock()
            .extend(emails.iter().map(|e| e.to_string()));
        backend
    }

    pub fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignupBackend for MemoryBackend {
    async fn find_record(&self, customer_id: &str) -> SignupResult<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail_lookup {
            return Err(SignupError::Transport("connection reset by peer".to_string()));
        }
        Ok(self.records.lock().get(customer_id).cloned())
    }

    async fn create_record(&self, record: &SignupRecord) -> SignupResult<SignupRecord> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(SignupError::Backend("Internal failure".to_string()));
        }
        self.records.lock().insert(record.customer_id.clone());
        self.created.lock().push(record.clone());
        Ok(record.clone())
    }
}
