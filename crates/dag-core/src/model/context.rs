//! Contexto de ejecución entregado a `NodeDefinition::run`.

use serde_json::{Map, Value};

/// Mapa de salida de un nodo: nombre de output → valor.
pub type NodeOutputs = Map<String, Value>;

/// Insumos de la invocación de un nodo: salidas de sus dependencias más
/// el snapshot resuelto de parámetros del pipeline.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Salidas de las dependencias declaradas, keyed por nombre de nodo.
    pub inputs: Map<String, Value>,
    /// Parámetros canónicos ya resueltos (objeto JSON).
    pub params: Value,
}

impl ExecutionContext {
    pub fn new(inputs: Map<String, Value>, params: Value) -> Self {
        Self { inputs, params }
    }

    /// Salida de la dependencia `node`, si está presente.
    pub fn input(&self, node: &str) -> Option<&Value> {
        self.inputs.get(node)
    }

    /// Parámetro por ruta con puntos (`"model.layers.hidden_units"`).
    pub fn param(&self, path: &str) -> Option<&Value> {
        let pointer = format!("/{}", path.replace('.', "/"));
        self.params.pointer(&pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_lookup_follows_dotted_path() {
        let ctx = ExecutionContext::new(Map::new(), json!({"model": {"lr": 0.01}}));
        assert_eq!(ctx.param("model.lr"), Some(&json!(0.01)));
        assert_eq!(ctx.param("model.missing"), None);
    }
}
