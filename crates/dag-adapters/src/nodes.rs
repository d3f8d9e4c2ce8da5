//! Nodos de ejemplo que implementan `NodeDefinition` directamente.
//!
//! Cubren los tres roles típicos de un pipeline: fuente (genera datos a
//! partir de parámetros), transformación (consume la salida de su
//! dependencia) y agregación. Todos leen su configuración del snapshot
//! de parámetros del contexto, nunca de estado propio.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use dag_core::{ExecutionContext, NodeDefinition, NodeError, NodeOutputs};

/// Parámetros del nodo fuente, bajo la clave `series` del pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesSpec {
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    pub count: u64,
}

fn default_step() -> f64 {
    1.0
}

/// Fuente: emite la serie `start, start+step, ...` de `count` elementos.
#[derive(Debug, Default)]
pub struct GenerateSeriesNode;

impl NodeDefinition for GenerateSeriesNode {
    fn name(&self) -> &str {
        "generate_series"
    }

    fn checkpointable(&self) -> bool {
        true
    }

    fn run(&self, ctx: &ExecutionContext) -> Result<NodeOutputs, NodeError> {
        let spec: SeriesSpec = ctx.param("series")
                                  .cloned()
                                  .map(serde_json::from_value)
                                  .transpose()
                                  .map_err(|err| NodeError::new(format!("invalid `series` params: {err}")))?
                                  .ok_or(NodeError::from("missing `series` params"))?;

        let values: Vec<Value> = (0..spec.count)
                                     .map(|i| json!(spec.start + spec.step * i as f64))
                                     .collect();
        let mut out = Map::new();
        out.insert("values".to_string(), json!(values));
        Ok(out)
    }
}

/// Transformación: promedio móvil de ventana `window` sobre la serie de
/// `generate_series`.
#[derive(Debug)]
pub struct MovingAverageNode {
    dependencies: Vec<String>,
}

impl MovingAverageNode {
    pub fn new() -> Self {
        Self { dependencies: vec!["generate_series".to_string()] }
    }
}

impl Default for MovingAverageNode {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeDefinition for MovingAverageNode {
    fn name(&self) -> &str {
        "moving_average"
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    fn checkpointable(&self) -> bool {
        true
    }

    fn run(&self, ctx: &ExecutionContext) -> Result<NodeOutputs, NodeError> {
        let window = ctx.param("window").and_then(Value::as_u64).unwrap_or(3) as usize;
        if window == 0 {
            return Err(NodeError::from("window must be at least 1"));
        }
        let values = series_input(ctx, "generate_series")?;

        let averaged: Vec<Value> = values.windows(window.min(values.len().max(1)))
                                         .map(|chunk| json!(chunk.iter().sum::<f64>() / chunk.len() as f64))
                                         .collect();
        let mut out = Map::new();
        out.insert("values".to_string(), json!(averaged));
        Ok(out)
    }
}

/// Agregación: mínimo, máximo y media de la serie suavizada.
#[derive(Debug)]
pub struct SummarizeNode {
    dependencies: Vec<String>,
}

impl SummarizeNode {
    pub fn new() -> Self {
        Self { dependencies: vec!["moving_average".to_string()] }
    }
}

impl Default for SummarizeNode {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeDefinition for SummarizeNode {
    fn name(&self) -> &str {
        "summarize"
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    fn run(&self, ctx: &ExecutionContext) -> Result<NodeOutputs, NodeError> {
        let values = series_input(ctx, "moving_average")?;
        if values.is_empty() {
            return Err(NodeError::from("cannot summarize an empty series"));
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        let mut out = Map::new();
        out.insert("min".to_string(), json!(min));
        out.insert("max".to_string(), json!(max));
        out.insert("mean".to_string(), json!(mean));
        out.insert("count".to_string(), json!(values.len()));
        Ok(out)
    }
}

/// Extrae el campo `values` de la salida de una dependencia como `Vec<f64>`.
fn series_input(ctx: &ExecutionContext, dependency: &str) -> Result<Vec<f64>, NodeError> {
    ctx.input(dependency)
       .and_then(|v| v["values"].as_array())
       .map(|values| values.iter().filter_map(Value::as_f64).collect())
       .ok_or_else(|| NodeError::new(format!("missing `values` output from '{dependency}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx_with(inputs: Value, params: Value) -> ExecutionContext {
        let inputs = inputs.as_object().cloned().unwrap_or_default();
        ExecutionContext::new(inputs, params)
    }

    #[test]
    fn generate_series_uses_params() {
        let ctx = ctx_with(json!({}), json!({"series": {"start": 1.0, "step": 2.0, "count": 3}}));
        let out = GenerateSeriesNode.run(&ctx).unwrap();
        assert_eq!(out["values"], json!([1.0, 3.0, 5.0]));
    }

    #[test]
    fn generate_series_requires_count() {
        let ctx = ctx_with(json!({}), json!({"series": {"start": 0.0}}));
        let err = GenerateSeriesNode.run(&ctx).unwrap_err();
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn generate_series_requires_the_series_key() {
        let ctx = ctx_with(json!({}), json!({}));
        let err = GenerateSeriesNode.run(&ctx).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn moving_average_smooths_the_series() {
        let ctx = ctx_with(json!({"generate_series": {"values": [1.0, 2.0, 3.0, 4.0]}}),
                           json!({"window": 2}));
        let out = MovingAverageNode::new().run(&ctx).unwrap();
        assert_eq!(out["values"], json!([1.5, 2.5, 3.5]));
    }

    #[test]
    fn summarize_reports_extremes_and_mean() {
        let ctx = ctx_with(json!({"moving_average": {"values": [1.0, 2.0, 3.0]}}), json!({}));
        let out = SummarizeNode::new().run(&ctx).unwrap();
        assert_eq!(out["min"], json!(1.0));
        assert_eq!(out["max"], json!(3.0));
        assert_eq!(out["mean"], json!(2.0));
        assert_eq!(out["count"], json!(3));
    }

    #[test]
    fn missing_dependency_output_is_a_node_error() {
        let ctx = ctx_with(json!({}), json!({}));
        let err = SummarizeNode::new().run(&ctx).unwrap_err();
        assert!(err.to_string().contains("moving_average"));
    }
}
