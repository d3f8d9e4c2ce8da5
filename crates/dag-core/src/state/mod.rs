//! Seguimiento de estado de ejecución por nodo.

pub mod tracker;

pub use tracker::{ExecutionState, InMemoryStateTracker, StateRecord, StateTracker};
