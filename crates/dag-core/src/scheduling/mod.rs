//! Resolución de orden de ejecución sobre el grafo de dependencias.

pub mod graph;
pub mod scheduler;

pub use graph::DependencyGraph;
pub use scheduler::{DependencyScheduler, Scheduler};
