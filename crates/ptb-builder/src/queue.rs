//! The shared object-lookup queue.
//!
//! Both resolution passes append `{id, input}` entries here; the orchestrator
//! drains the queue in one batched chain-state call and writes results back
//! positionally.

use serde_json::Value;

use sui_ptb_types::ObjectId;

use crate::builder::{Input, InputValue};
use crate::error::BuildError;

/// One queued lookup: which object, and which input receives its reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedObject {
    pub id: ObjectId,
    pub input: u16,
}

/// Object identifiers awaiting the batched lookup, in queue order.
#[derive(Debug, Default)]
pub struct ObjectQueue {
    entries: Vec<QueuedObject>,
}

impl ObjectQueue {
    pub fn push(&mut self, id: ObjectId, input: u16) {
        self.entries.push(QueuedObject { id, input });
    }

    /// Enqueue an unresolved input that must hold a textual object
    /// identifier; any other raw shape is a fatal error.
    pub fn push_textual(&mut self, input: &Input, index: u16) -> Result<(), BuildError> {
        let raw = match input.value() {
            InputValue::UnresolvedObject(id) => id.clone(),
            InputValue::UnresolvedPure(Value::String(s)) => s.clone(),
            InputValue::UnresolvedPure(other) => {
                return Err(BuildError::ExpectedObjectId {
                    input: index,
                    value: other.to_string(),
                })
            }
            InputValue::Resolved(_) => return Ok(()),
        };
        let id = ObjectId::from_hex_literal(&raw).map_err(|_| BuildError::ExpectedObjectId {
            input: index,
            value: raw,
        })?;
        self.push(id, index);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The queued ids, in queue order, for the batched request.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn entries(&self) -> &[QueuedObject] {
        &self.entries
    }
}
