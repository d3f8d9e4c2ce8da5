//! Orquestación: compone scheduler, tracker de estado y proveedor de
//! datos para ejecutar un Pipeline completo.

pub mod orchestrator;
pub mod parallel;

pub use orchestrator::{checkpoint_key, Orchestrator, SchedulingOrchestrator};
pub use parallel::ParallelOrchestrator;
