//! Pruebas de las cotas numéricas de `Param`.
//!
//! Para toda combinación válida de (gt, ge, lt, le), `validate` acepta
//! valores estrictamente dentro del rango y rechaza violaciones de
//! frontera nombrando la cota correcta en el fallo.

use dag_core::{Param, ParamError};
use serde_json::json;

fn constraint_of(err: ParamError) -> String {
    match err {
        ParamError::ValueConstraint { constraint, .. } => constraint,
        other => panic!("expected ValueConstraint, got {other}"),
    }
}

#[test]
fn gt_accepts_interior_and_rejects_boundary() {
    let param = Param::new().gt(0.0);
    assert!(param.validate(&json!(1)).is_ok());
    assert!(param.validate(&json!(0.001)).is_ok());
    let constraint = constraint_of(param.validate(&json!(0)).unwrap_err());
    assert_eq!(constraint, "gt 0");
}

#[test]
fn ge_accepts_boundary() {
    let param = Param::new().ge(0.0);
    assert!(param.validate(&json!(0)).is_ok());
    let constraint = constraint_of(param.validate(&json!(-1)).unwrap_err());
    assert_eq!(constraint, "ge 0");
}

#[test]
fn lt_rejects_boundary() {
    let param = Param::new().lt(100.0);
    assert!(param.validate(&json!(99.9)).is_ok());
    let constraint = constraint_of(param.validate(&json!(100)).unwrap_err());
    assert_eq!(constraint, "lt 100");
}

#[test]
fn le_accepts_boundary() {
    let param = Param::new().le(100.0);
    assert!(param.validate(&json!(100)).is_ok());
    let constraint = constraint_of(param.validate(&json!(101)).unwrap_err());
    assert_eq!(constraint, "le 100");
}

#[test]
fn combined_range_names_the_violated_bound() {
    // rango (0, 10]: gt 0, le 10
    let param = Param::new().gt(0.0).le(10.0);
    assert!(param.validate(&json!(5)).is_ok());
    assert_eq!(constraint_of(param.validate(&json!(0)).unwrap_err()), "gt 0");
    assert_eq!(constraint_of(param.validate(&json!(11)).unwrap_err()), "le 10");
}

#[test]
fn bounds_run_in_declaration_order() {
    // un valor que viola gt y lt a la vez reporta gt (primero en el orden fijo)
    let param = Param::new().gt(5.0).lt(3.0);
    assert_eq!(constraint_of(param.validate(&json!(1)).unwrap_err()), "gt 5");
    assert_eq!(constraint_of(param.validate(&json!(6)).unwrap_err()), "lt 3");
}

#[test]
fn non_numeric_candidate_violates_the_bound() {
    let param = Param::new().gt(0.0);
    let constraint = constraint_of(param.validate(&json!("abc")).unwrap_err());
    assert_eq!(constraint, "gt 0");
}
