//! Orquestador secuencial con lógica de checkpoint.
//!
//! El loop: aplicar config → resolver orden → por cada nodo decidir si
//! saltear (ya completado y checkpointable, reutilizando la salida
//! persistida) o ejecutar (marcar running, armar inputs, invocar,
//! persistir, marcar completed). Un fallo de nodo marca failed y corta
//! la corrida; los resultados ya persistidos quedan válidos para una
//! corrida reanudada.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::datastore::DataProvider;
use crate::errors::EngineError;
use crate::model::ExecutionContext;
use crate::node::NodeDefinition;
use crate::pipeline::Pipeline;
use crate::scheduling::Scheduler;
use crate::state::{ExecutionState, StateTracker};

/// Key bajo la que se persiste (y se rastrea) la salida de un nodo.
/// Opaca para el proveedor; estable entre corridas del mismo pipeline.
pub fn checkpoint_key(pipeline: &str, node: &str) -> String {
    format!("{pipeline}/{node}")
}

/// Contrato del orquestador: una corrida completa de un Pipeline.
pub trait Orchestrator {
    /// Ejecuta el pipeline con la config dada y devuelve el mapa nombre
    /// de nodo → resultado para todos los nodos que corrieron o fueron
    /// salteados como completados.
    fn execute_pipeline(&self,
                        pipeline: &mut Pipeline,
                        config: &Value)
                        -> Result<IndexMap<String, Value>, EngineError>;
}

/// Orquestador secuencial, genérico sobre sus colaboradores.
#[derive(Debug)]
pub struct SchedulingOrchestrator<S, T, D>
    where S: Scheduler,
          T: StateTracker,
          D: DataProvider
{
    scheduler: S,
    state_tracker: T,
    data_provider: D,
}

impl<S, T, D> SchedulingOrchestrator<S, T, D>
    where S: Scheduler,
          T: StateTracker,
          D: DataProvider
{
    pub fn new(scheduler: S, state_tracker: T, data_provider: D) -> Self {
        Self { scheduler,
               state_tracker,
               data_provider }
    }

    pub fn state_tracker(&self) -> &T {
        &self.state_tracker
    }

    pub fn data_provider(&self) -> &D {
        &self.data_provider
    }
}

impl SchedulingOrchestrator<crate::scheduling::DependencyScheduler,
                            crate::state::InMemoryStateTracker,
                            crate::datastore::InMemoryDataProvider>
{
    /// Orquestador con colaboradores en memoria.
    pub fn in_memory() -> Self {
        Self::new(crate::scheduling::DependencyScheduler::new(),
                  crate::state::InMemoryStateTracker::new(),
                  crate::datastore::InMemoryDataProvider::new())
    }
}

impl<S, T, D> Orchestrator for SchedulingOrchestrator<S, T, D>
    where S: Scheduler,
          T: StateTracker,
          D: DataProvider
{
    fn execute_pipeline(&self,
                        pipeline: &mut Pipeline,
                        config: &Value)
                        -> Result<IndexMap<String, Value>, EngineError> {
        // La config se aplica por completo antes de que cualquier nodo
        // comience; a partir de acá los parámetros sólo se leen.
        pipeline.params_mut().apply_config(config)?;
        let order = self.scheduler.resolve_dependencies(pipeline)?;
        let params = Value::Object(pipeline.params().to_config());

        let run_id = Uuid::new_v4();
        info!(run_id = %run_id,
              pipeline = %pipeline.name(),
              nodes = order.len(),
              "pipeline run starting");

        let mut results: IndexMap<String, Value> = IndexMap::new();
        for name in &order {
            let node = pipeline.node(name)
                               .expect("scheduler only returns registered nodes");
            let key = checkpoint_key(pipeline.name(), name);

            if self.state_tracker.get_state(&key) == ExecutionState::Completed && node.checkpointable() {
                debug!(node = %name, "node already completed; reusing persisted output");
                let persisted = self.data_provider.load(&key)?;
                results.insert(name.clone(), persisted);
                continue;
            }

            self.state_tracker.update_state(&key, ExecutionState::Running);
            self.state_tracker.log_start(name);

            let ctx = assemble_context(node, &results, &params);
            match node.run(&ctx) {
                Ok(outputs) => {
                    let value = Value::Object(outputs.clone());
                    self.data_provider.save(&key, &value)?;
                    self.state_tracker.update_state(&key, ExecutionState::Completed);
                    self.state_tracker.log_end(name, &outputs);
                    results.insert(name.clone(), value);
                }
                Err(err) => {
                    self.state_tracker.update_state(&key, ExecutionState::Failed);
                    warn!(node = %name, error = %err, "node failed; aborting run");
                    return Err(EngineError::NodeExecution { node: name.clone(),
                                                            reason: err.to_string() });
                }
            }
        }

        info!(run_id = %run_id, pipeline = %pipeline.name(), "pipeline run finished");
        Ok(results)
    }
}

/// Arma el contexto de un nodo: salidas de sus dependencias (ya
/// computadas en esta corrida o recuperadas al saltear) más el snapshot
/// de parámetros. El mapa de resultados es propiedad de la corrida; el
/// nodo no retiene referencias más allá de su invocación.
pub(crate) fn assemble_context(node: &dyn NodeDefinition,
                               results: &IndexMap<String, Value>,
                               params: &Value)
                               -> ExecutionContext {
    let mut inputs = Map::new();
    for dep in node.dependencies() {
        if let Some(output) = results.get(dep) {
            inputs.insert(dep.clone(), output.clone());
        }
    }
    ExecutionContext::new(inputs, params.clone())
}
