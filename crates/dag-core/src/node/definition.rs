//! Contrato de un nodo de procesamiento.

use crate::errors::NodeError;
use crate::model::{ExecutionContext, NodeOutputs};

/// Trait que define un nodo del pipeline. Implementaciones deben ser
/// puras respecto a inputs + params: el resultado de la corrida vive en
/// el mapa de resultados del orquestador, nunca en el nodo.
pub trait NodeDefinition: Send + Sync {
    /// Nombre estable y único dentro del Pipeline.
    fn name(&self) -> &str;

    /// Nombres de los nodos de los que éste depende. Referencias no
    /// propietarias dentro del mismo Pipeline.
    fn dependencies(&self) -> &[String] {
        &[]
    }

    /// Si la ejecución completada del nodo puede saltearse en una corrida
    /// reanudada, reutilizando su salida persistida.
    fn checkpointable(&self) -> bool {
        false
    }

    /// Ejecuta la unidad de trabajo. Cualquier error se trata como fallo
    /// del nodo y detiene la corrida.
    fn run(&self, ctx: &ExecutionContext) -> Result<NodeOutputs, NodeError>;
}
