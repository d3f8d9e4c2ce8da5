//! Pruebas de resolución de orden sobre pipelines completos: orden
//! topológico determinista y diagnóstico de ciclos.

use dag_core::{DependencyScheduler, FnNode, GraphError, Pipeline, Scheduler};
use serde_json::Map;

fn node(name: &str, deps: &[&str]) -> FnNode {
    FnNode::new(name, |_| Ok(Map::new())).after(deps.iter().map(|d| d.to_string()))
}

fn pipeline_of(nodes: &[(&str, &[&str])]) -> Pipeline {
    let mut pipeline = Pipeline::new("order");
    for (name, deps) in nodes {
        pipeline.add_node(node(name, deps)).unwrap();
    }
    pipeline
}

#[test]
fn order_respects_dependencies_and_breaks_ties_by_registration() {
    let pipeline = pipeline_of(&[("c", &["a", "b"]), ("a", &[]), ("b", &["a"]), ("d", &[])]);
    let order = DependencyScheduler::new().resolve_dependencies(&pipeline).unwrap();
    // "c" se registró primero, así que apenas sus dependencias están
    // satisfechas sale antes que "d" (raíz registrada después)
    assert_eq!(order, vec!["a", "b", "c", "d"]);
}

#[test]
fn order_is_stable_across_calls() {
    let pipeline = pipeline_of(&[("x", &[]), ("y", &[]), ("z", &["x", "y"])]);
    let scheduler = DependencyScheduler::new();
    let first = scheduler.resolve_dependencies(&pipeline).unwrap();
    let second = scheduler.resolve_dependencies(&pipeline).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cycle_error_lists_only_cycle_members() {
    // a → b → c → a, con "entry" antes y "exit" después del ciclo
    let pipeline = pipeline_of(&[("entry", &[]),
                                 ("a", &["entry", "c"]),
                                 ("b", &["a"]),
                                 ("c", &["b"]),
                                 ("exit", &["c"])]);
    let err = DependencyScheduler::new().resolve_dependencies(&pipeline).unwrap_err();
    match err {
        GraphError::CyclicDependency(members) => {
            assert_eq!(members, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        }
        other => panic!("expected CyclicDependency, got {other}"),
    }
}

#[test]
fn self_dependency_is_a_cycle() {
    let pipeline = pipeline_of(&[("loner", &["loner"])]);
    let err = DependencyScheduler::new().resolve_dependencies(&pipeline).unwrap_err();
    assert_eq!(err, GraphError::CyclicDependency(vec!["loner".to_string()]));
}

#[test]
fn unknown_dependency_is_reported_with_both_names() {
    let pipeline = pipeline_of(&[("a", &["ghost"])]);
    let err = DependencyScheduler::new().resolve_dependencies(&pipeline).unwrap_err();
    assert_eq!(err,
               GraphError::MissingDependency { node: "a".to_string(),
                                               dependency: "ghost".to_string() });
}
