//! forwarding - upsert seam to the fast-path forwarding table

use async_std::sync::Mutex;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

const MAX_RULES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForwardingError {
    #[error("forwarding table is not ready")]
    TableNotReady,
    #[error("conflicting rule already installed for TEID {0:#010x}")]
    KeyConflict(u32),
    #[error("forwarding table capacity exceeded")]
    CapacityExceeded,
}

/// The kernel-resident fast path keys forwarding rules by tunnel endpoint
/// identifier.  The action encoding is opaque to the control plane; this
/// seam only carries it across.
#[async_trait]
pub trait ForwardingTable: Send + Sync + 'static {
    async fn upsert(&self, teid: u32, action: u32) -> Result<(), ForwardingError>;
}

/// Bounded in-memory table standing where a kernel-resident map plugs in.
#[derive(Clone)]
pub struct InMemoryForwardingTable {
    rules: Arc<Mutex<HashMap<u32, u32>>>,
    capacity: usize,
}

impl InMemoryForwardingTable {
    pub fn new() -> Self {
        Self::with_capacity(MAX_RULES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InMemoryForwardingTable {
            rules: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    pub async fn action(&self, teid: u32) -> Option<u32> {
        self.rules.lock().await.get(&teid).copied()
    }
}

impl Default for InMemoryForwardingTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForwardingTable for InMemoryForwardingTable {
    async fn upsert(&self, teid: u32, action: u32) -> Result<(), ForwardingError> {
        let mut rules = self.rules.lock().await;
        if !rules.contains_key(&teid) && rules.len() >= self.capacity {
            return Err(ForwardingError::CapacityExceeded);
        }
        rules.insert(teid, action);
        Ok(())
    }
}
