//! dag-core: motor de ejecución de pipelines dirigido por dependencias.
//!
//! Corre un DAG de nodos de cómputo: resuelve el orden de ejecución a
//! partir de las dependencias declaradas, valida e inyecta parámetros
//! tipados y rastrea el estado por nodo para soportar corridas
//! reanudables con checkpoints.

pub mod datastore;
pub mod errors;
pub mod model;
pub mod node;
pub mod orchestration;
pub mod params;
pub mod pipeline;
pub mod scheduling;
pub mod state;

pub use datastore::{DataProvider, InMemoryDataProvider};
pub use errors::{DataError, EngineError, GraphError, NodeError, ParamError};
pub use model::{ExecutionContext, NodeOutputs};
pub use node::{FnNode, NodeDefinition};
pub use orchestration::{checkpoint_key, Orchestrator, ParallelOrchestrator, SchedulingOrchestrator};
pub use params::{GlobalArgs, Param, ParamEntry, ParamType, ParameterSet, Resolved, SweepParam, ValidatorTargets};
pub use pipeline::Pipeline;
pub use scheduling::{DependencyGraph, DependencyScheduler, Scheduler};
pub use state::{ExecutionState, InMemoryStateTracker, StateTracker};
