//! Orquestador paralelo: explota el orden parcial del DAG.
//!
//! El orden total del scheduler alcanza para una ejecución secuencial,
//! pero el grafo sólo exige un orden parcial: nodos sin relación
//! transitiva pueden correr a la vez. Acá cada ola de dependencias
//! (`DependencyGraph::execution_levels`) se ejecuta con workers de
//! rayon; la barrera entre olas es el chequeo dependencias-completas.
//! Si un nodo falla, sus hermanos en vuelo terminan su ola (sin
//! cancelación forzada) pero ninguna ola posterior comienza.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::datastore::DataProvider;
use crate::errors::EngineError;
use crate::orchestration::orchestrator::{assemble_context, checkpoint_key, Orchestrator};
use crate::pipeline::Pipeline;
use crate::scheduling::DependencyGraph;
use crate::state::{ExecutionState, StateTracker};

/// Variante concurrente del orquestador. Mismo contrato, misma
/// semántica de checkpoint; sólo cambia la estrategia de ejecución.
#[derive(Debug)]
pub struct ParallelOrchestrator<T, D>
    where T: StateTracker,
          D: DataProvider
{
    state_tracker: T,
    data_provider: D,
}

impl<T, D> ParallelOrchestrator<T, D>
    where T: StateTracker,
          D: DataProvider
{
    pub fn new(state_tracker: T, data_provider: D) -> Self {
        Self { state_tracker,
               data_provider }
    }

    pub fn state_tracker(&self) -> &T {
        &self.state_tracker
    }

    pub fn data_provider(&self) -> &D {
        &self.data_provider
    }

    fn run_node(&self,
                pipeline: &Pipeline,
                name: &str,
                results: &IndexMap<String, Value>,
                params: &Value)
                -> Result<Value, EngineError> {
        let node = pipeline.node(name)
                           .expect("levels only contain registered nodes");
        let key = checkpoint_key(pipeline.name(), name);

        if self.state_tracker.get_state(&key) == ExecutionState::Completed && node.checkpointable() {
            debug!(node = %name, "node already completed; reusing persisted output");
            return Ok(self.data_provider.load(&key)?);
        }

        self.state_tracker.update_state(&key, ExecutionState::Running);
        self.state_tracker.log_start(name);

        let ctx = assemble_context(node, results, params);
        match node.run(&ctx) {
            Ok(outputs) => {
                let value = Value::Object(outputs.clone());
                self.data_provider.save(&key, &value)?;
                self.state_tracker.update_state(&key, ExecutionState::Completed);
                self.state_tracker.log_end(name, &outputs);
                Ok(value)
            }
            Err(err) => {
                self.state_tracker.update_state(&key, ExecutionState::Failed);
                warn!(node = %name, error = %err, "node failed");
                Err(EngineError::NodeExecution { node: name.to_string(),
                                                 reason: err.to_string() })
            }
        }
    }
}

impl<T, D> Orchestrator for ParallelOrchestrator<T, D>
    where T: StateTracker,
          D: DataProvider
{
    fn execute_pipeline(&self,
                        pipeline: &mut Pipeline,
                        config: &Value)
                        -> Result<IndexMap<String, Value>, EngineError> {
        pipeline.params_mut().apply_config(config)?;
        let graph = DependencyGraph::from_pipeline(pipeline)?;
        let levels = graph.execution_levels()?;
        let params = Value::Object(pipeline.params().to_config());

        let run_id = Uuid::new_v4();
        info!(run_id = %run_id,
              pipeline = %pipeline.name(),
              levels = levels.len(),
              "parallel pipeline run starting");

        // reborrow inmutable: desde acá los parámetros sólo se leen
        let pipeline = &*pipeline;
        let mut results: IndexMap<String, Value> = IndexMap::new();
        for level in levels {
            let outcomes: Vec<(String, Result<Value, EngineError>)> =
                level.par_iter()
                     .map(|name| (name.clone(), self.run_node(pipeline, name, &results, &params)))
                     .collect();

            let mut first_failure = None;
            for (name, outcome) in outcomes {
                match outcome {
                    Ok(value) => {
                        results.insert(name, value);
                    }
                    Err(err) => {
                        if first_failure.is_none() {
                            first_failure = Some(err);
                        }
                    }
                }
            }
            // los hermanos de la ola ya terminaron; no arranca otra ola
            if let Some(err) = first_failure {
                return Err(err);
            }
        }

        info!(run_id = %run_id, pipeline = %pipeline.name(), "parallel pipeline run finished");
        Ok(results)
    }
}
