//! Pruebas del grid de barrido: producto cartesiano de candidatos con
//! valores fijos replicados en cada configuración.

use dag_core::{Param, ParamError, ParameterSet, SweepParam};
use serde_json::json;

#[test]
fn grid_size_is_the_product_of_candidate_counts() {
    let params = ParameterSet::new().with("lr", SweepParam::new(vec![json!(0.1), json!(0.01), json!(0.001)]))
                                    .with("batch", SweepParam::new(vec![json!(16), json!(32)]))
                                    .with("epochs", 10i64);
    let grid = params.generate_sweep_grid().unwrap();
    assert_eq!(grid.len(), 6);
    for config in &grid {
        assert_eq!(config["epochs"], json!(10));
    }
}

#[test]
fn grid_order_advances_the_last_sweep_fastest() {
    let params = ParameterSet::new().with("a", SweepParam::new(vec![json!(1), json!(2)]))
                                    .with("b", SweepParam::new(vec![json!("x"), json!("y")]));
    let grid = params.generate_sweep_grid().unwrap();
    let pairs: Vec<(i64, &str)> =
        grid.iter()
            .map(|c| (c["a"].as_i64().unwrap(), c["b"].as_str().unwrap()))
            .collect();
    assert_eq!(pairs, vec![(1, "x"), (1, "y"), (2, "x"), (2, "y")]);
}

#[test]
fn single_sweep_yields_one_config_per_candidate() {
    let params = ParameterSet::new().with("seed", SweepParam::new(vec![json!(1), json!(2), json!(3)]));
    let grid = params.generate_sweep_grid().unwrap();
    assert_eq!(grid.len(), 3);
    assert_eq!(grid[2]["seed"], json!(3));
}

#[test]
fn grid_without_sweeps_is_an_error() {
    let params = ParameterSet::new().with("only_fixed", 1i64);
    assert!(matches!(params.generate_sweep_grid(), Err(ParamError::EmptySweep)));
}

#[test]
fn fixed_nested_sets_appear_as_resolved_objects() {
    let params = ParameterSet::new().with("lr", SweepParam::new(vec![json!(0.1)]))
                                    .with("model", ParameterSet::new().with("hidden_units", 128i64));
    let grid = params.generate_sweep_grid().unwrap();
    assert_eq!(grid[0]["model"], json!({"hidden_units": 128}));
}

#[test]
fn constrained_sweep_candidates_validate_before_gridding() {
    let params = ParameterSet::lenient().with("lr",
                                              SweepParam::with_param(Param::new().gt(0.0),
                                                                     vec![json!(0.1), json!(-0.5)]));
    // validate() por entrada sólo diagnostica; el candidato inválido se
    // detecta consultando el sweep directamente
    match params.get("lr") {
        Some(dag_core::ParamEntry::Sweep(sweep)) => assert!(sweep.validate().is_err()),
        other => panic!("unexpected entry: {other:?}"),
    }
}
