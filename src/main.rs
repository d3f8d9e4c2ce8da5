//! Demo ejecutable del motor: arma un pipeline de tres nodos, lo corre
//! dos veces contra el mismo directorio de datos (la segunda corrida
//! saltea los nodos checkpointable ya completados) y muestra la
//! expansión de un grid de barrido.
//!
//! Nivel de log vía `DAGFLOW_LOG` (ej. "debug"); default "info".

use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dag_adapters::{GenerateSeriesNode, JsonDirProvider, MovingAverageNode, SummarizeNode};
use dag_core::scheduling::DependencyScheduler;
use dag_core::{checkpoint_key, EngineError, ExecutionState, InMemoryStateTracker, Orchestrator, ParameterSet,
               Pipeline, SchedulingOrchestrator, StateTracker, SweepParam};

fn init_logging() {
    let filter = EnvFilter::try_from_env("DAGFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_target(false)
                             .init();
}

fn series_pipeline() -> Result<Pipeline, EngineError> {
    let mut pipeline = Pipeline::new("series");
    pipeline.params_mut().insert("series",
                                 ParameterSet::new().with("start", 0.0f64)
                                                    .with("step", 0.5f64)
                                                    .with("count", 20i64));
    pipeline.params_mut().insert("window", 4i64);
    pipeline.add_node(GenerateSeriesNode)?;
    pipeline.add_node(MovingAverageNode::new())?;
    pipeline.add_node(SummarizeNode::new())?;
    Ok(pipeline)
}

fn run_and_report(orchestrator: &impl Orchestrator,
                  config: &Value)
                  -> Result<IndexMap<String, Value>, EngineError> {
    let mut pipeline = series_pipeline()?;
    let results = orchestrator.execute_pipeline(&mut pipeline, config)?;
    info!(summary = %results["summarize"], "run finished");
    Ok(results)
}

fn demo_resume(data_dir: &str) -> Result<(), EngineError> {
    let first = SchedulingOrchestrator::new(DependencyScheduler::new(),
                                            InMemoryStateTracker::new(),
                                            JsonDirProvider::new(data_dir));
    run_and_report(&first, &json!({}))?;

    // segunda instancia: el tracker se siembra desde los estados finales
    // de la primera y el proveedor relee los archivos ya escritos
    let tracker = InMemoryStateTracker::new();
    for node in ["generate_series", "moving_average"] {
        tracker.update_state(&checkpoint_key("series", node), ExecutionState::Completed);
    }
    let second = SchedulingOrchestrator::new(DependencyScheduler::new(),
                                             tracker,
                                             JsonDirProvider::new(data_dir));
    info!("resuming: generate_series and moving_average should be skipped");
    run_and_report(&second, &json!({"window": 4}))?;
    Ok(())
}

fn demo_sweep() -> Result<(), EngineError> {
    let params = ParameterSet::new().with("window", SweepParam::new(vec![json!(2), json!(4), json!(8)]))
                                    .with("series",
                                          ParameterSet::new().with("start", 0.0f64)
                                                             .with("step", 0.5f64)
                                                             .with("count", 20i64));
    let grid = params.generate_sweep_grid()?;
    info!(configs = grid.len(), "sweep grid expanded");

    for config in grid {
        // colaboradores frescos por configuración: cada punto del grid
        // es una corrida independiente, sin checkpoints compartidos
        let orchestrator = SchedulingOrchestrator::in_memory();
        let results = run_and_report(&orchestrator, &Value::Object(config.clone()))?;
        info!(window = %config["window"],
              mean = %results["summarize"]["mean"],
              "sweep configuration finished");
    }
    Ok(())
}

fn main() -> Result<(), EngineError> {
    init_logging();
    let data_dir = std::env::var("DAGFLOW_DATA").unwrap_or_else(|_| "dagflow-data".to_string());

    demo_resume(&data_dir)?;
    demo_sweep()?;
    Ok(())
}
