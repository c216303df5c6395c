//! Deferred references to command results.
//!
//! A [`ResultRef`] is handed out when a command is appended. It stands for the
//! command's eventual output: usable directly as a single argument, or
//! destructured positionally for commands that return multiple values. The
//! values it produces are structural placeholders only; they are given meaning
//! by the executing network, never at build time.

use parking_lot::Mutex;

use sui_ptb_types::Argument;

use crate::error::BuildError;

/// A lazy view of a command's output, keyed by the owning command's index.
///
/// Nested positions are produced on demand and memoized, so repeated requests
/// for the same position yield structurally identical values. There is no
/// arity check against the command's real output count: over-reading a
/// position yields a reference that fails at execution time, not here.
#[derive(Debug)]
pub struct ResultRef {
    index: u16,
    nested: Mutex<Vec<Argument>>,
}

impl ResultRef {
    pub(crate) fn new(index: u16) -> Self {
        Self {
            index,
            nested: Mutex::new(Vec::new()),
        }
    }

    /// The index of the command this reference is bound to.
    pub fn index(&self) -> u16 {
        self.index
    }

    /// The whole result as a single argument: `Result(index)`.
    pub fn arg(&self) -> Argument {
        Argument::Result(self.index)
    }

    /// The value at `position` of a multi-value result:
    /// `NestedResult(index, position)`.
    pub fn nested(&self, position: u16) -> Argument {
        let mut cache = self.nested.lock();
        while cache.len() <= position as usize {
            let next = cache.len() as u16;
            cache.push(Argument::NestedResult(self.index, next));
        }
        cache[position as usize]
    }

    /// Result references cannot be written through. Always fails with
    /// [`BuildError::ResultReferenceImmutable`].
    pub fn set_nested(&self, _position: u16, _value: Argument) -> Result<(), BuildError> {
        Err(BuildError::ResultReferenceImmutable)
    }
}

impl From<&ResultRef> for Argument {
    fn from(r: &ResultRef) -> Self {
        r.arg()
    }
}
