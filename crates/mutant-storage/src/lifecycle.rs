//! Scoped-resource state shared by both backings.

use mutant_core::errors::{StoreError, StoreResult};

/// `Uninitialized` -> `Open` on `initialize()`, -> `Closed` on `shutdown()`.
/// `Closed` is terminal.
pub(crate) enum Lifecycle<T> {
    Uninitialized,
    Open(T),
    Closed,
}

impl<T> Lifecycle<T> {
    pub(crate) fn get(&self) -> StoreResult<&T> {
        match self {
            Lifecycle::Open(inner) => Ok(inner),
            Lifecycle::Uninitialized => Err(StoreError::NotInitialized),
            Lifecycle::Closed => Err(StoreError::Closed),
        }
    }

    pub(crate) fn get_mut(&mut self) -> StoreResult<&mut T> {
        match self {
            Lifecycle::Open(inner) => Ok(inner),
            Lifecycle::Uninitialized => Err(StoreError::NotInitialized),
            Lifecycle::Closed => Err(StoreError::Closed),
        }
    }

    /// Move to `Closed`, handing back the open resource if there was one.
    pub(crate) fn close(&mut self) -> Option<T> {
        match std::mem::replace(self, Lifecycle::Closed) {
            Lifecycle::Open(inner) => Some(inner),
            _ => None,
        }
    }
}
