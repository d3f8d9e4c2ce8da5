//! Pruebas del orquestador paralelo sobre un DAG en diamante: mismos
//! resultados que la ejecución secuencial, y semántica de olas ante
//! fallos.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dag_core::{checkpoint_key, DataProvider, EngineError, ExecutionState, FnNode, InMemoryDataProvider,
               InMemoryStateTracker, NodeError, NodeOutputs, Orchestrator, ParallelOrchestrator, Pipeline,
               SchedulingOrchestrator, StateTracker};
use serde_json::{json, Map, Value};

fn emit(key: &str, value: Value) -> NodeOutputs {
    let mut out = Map::new();
    out.insert(key.to_string(), value);
    out
}

//        source
//        /    \
//    double   square
//        \    /
//         join
fn diamond_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new("diamond");
    pipeline.params_mut().insert("seed", 3i64);

    pipeline.add_node(FnNode::new("source", |ctx| {
                          let seed = ctx.param("seed").and_then(Value::as_i64).unwrap_or(0);
                          Ok(emit("n", json!(seed)))
                      }))
            .unwrap();
    pipeline.add_node(FnNode::new("double", |ctx| {
                          let n = ctx.input("source").and_then(|v| v["n"].as_i64()).unwrap_or(0);
                          Ok(emit("n", json!(n * 2)))
                      }).after(["source"]))
            .unwrap();
    pipeline.add_node(FnNode::new("square", |ctx| {
                          let n = ctx.input("source").and_then(|v| v["n"].as_i64()).unwrap_or(0);
                          Ok(emit("n", json!(n * n)))
                      }).after(["source"]))
            .unwrap();
    pipeline.add_node(FnNode::new("join", |ctx| {
                          let d = ctx.input("double").and_then(|v| v["n"].as_i64()).unwrap_or(0);
                          let s = ctx.input("square").and_then(|v| v["n"].as_i64()).unwrap_or(0);
                          Ok(emit("sum", json!(d + s)))
                      }).after(["double", "square"]))
            .unwrap();

    pipeline
}

#[test]
fn parallel_and_sequential_runs_agree_on_a_diamond() {
    let mut sequential = diamond_pipeline();
    let mut parallel = diamond_pipeline();

    let seq_results = SchedulingOrchestrator::in_memory().execute_pipeline(&mut sequential, &json!({}))
                                                         .unwrap();
    let par_results =
        ParallelOrchestrator::new(InMemoryStateTracker::new(), InMemoryDataProvider::new())
            .execute_pipeline(&mut parallel, &json!({}))
            .unwrap();

    assert_eq!(seq_results.len(), par_results.len());
    for (name, value) in &seq_results {
        assert_eq!(par_results.get(name), Some(value), "mismatch at node {name}");
    }
    assert_eq!(par_results["join"], json!({"sum": 15}));
}

#[test]
fn failing_node_lets_its_wave_finish_but_blocks_later_waves() {
    let join_calls = Arc::new(AtomicUsize::new(0));

    let mut pipeline = Pipeline::new("partial");
    pipeline.add_node(FnNode::new("source", |_| Ok(emit("n", json!(1))))).unwrap();
    pipeline.add_node(FnNode::new("ok_branch", |_| Ok(emit("n", json!(2)))).after(["source"]))
            .unwrap();
    pipeline.add_node(FnNode::new("bad_branch", |_| Err(NodeError::from("branch failed"))).after(["source"]))
            .unwrap();
    let calls = Arc::clone(&join_calls);
    pipeline.add_node(FnNode::new("join", move |_| {
                          calls.fetch_add(1, Ordering::SeqCst);
                          Ok(Map::new())
                      }).after(["ok_branch", "bad_branch"]))
            .unwrap();

    let orchestrator = ParallelOrchestrator::new(InMemoryStateTracker::new(), InMemoryDataProvider::new());
    let err = orchestrator.execute_pipeline(&mut pipeline, &json!({})).unwrap_err();

    match err {
        EngineError::NodeExecution { node, .. } => assert_eq!(node, "bad_branch"),
        other => panic!("expected NodeExecution, got {other}"),
    }
    // la ola del fallo terminó: el hermano corrió y quedó Completed
    let tracker = orchestrator.state_tracker();
    assert_eq!(tracker.get_state(&checkpoint_key("partial", "ok_branch")),
               ExecutionState::Completed);
    assert_eq!(tracker.get_state(&checkpoint_key("partial", "bad_branch")),
               ExecutionState::Failed);
    // ninguna ola posterior arrancó
    assert_eq!(join_calls.load(Ordering::SeqCst), 0);
    assert_eq!(tracker.get_state(&checkpoint_key("partial", "join")),
               ExecutionState::NotStarted);
}

#[test]
fn parallel_run_honors_checkpoints() {
    let mut pipeline = Pipeline::new("resume");
    pipeline.add_node(FnNode::new("slow", |_| Err(NodeError::from("should have been skipped"))).checkpoint())
            .unwrap();
    pipeline.add_node(FnNode::new("next", |ctx| {
                          let n = ctx.input("slow").and_then(|v| v["n"].as_i64()).unwrap_or(0);
                          Ok(emit("n", json!(n + 1)))
                      }).after(["slow"]))
            .unwrap();

    let tracker = InMemoryStateTracker::new();
    let provider = InMemoryDataProvider::new();
    tracker.update_state(&checkpoint_key("resume", "slow"), ExecutionState::Completed);
    provider.save(&checkpoint_key("resume", "slow"), &json!({"n": 41})).unwrap();

    let orchestrator = ParallelOrchestrator::new(tracker, provider);
    let results = orchestrator.execute_pipeline(&mut pipeline, &json!({})).unwrap();

    assert_eq!(results["slow"], json!({"n": 41}));
    assert_eq!(results["next"], json!({"n": 42}));
}
