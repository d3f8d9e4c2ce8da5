//! Errores específicos del core.
//!
//! Cada familia de errores cubre una preocupación: `ParamError` para el
//! sistema de parámetros, `GraphError` para la estructura del DAG,
//! `DataError` para el acceso a datos y `EngineError` como agregado que
//! atraviesa la orquestación. Todo error fatal identifica a la entidad
//! ofensora por nombre (parámetro, nodo o miembros del ciclo).

use serde_json::Value;
use thiserror::Error;

use crate::params::ParamType;

/// Errores del sistema de parámetros.
#[derive(Debug, Error)]
pub enum ParamError {
    /// El candidato no coincide con el tipo declarado.
    #[error("expected value of type {expected}, got {value}")]
    TypeConstraint { expected: ParamType, value: Value },

    /// El candidato viola una cota numérica, patrón, set de opciones o
    /// predicado. `constraint` nombra la restricción exacta que falló.
    #[error("value {value} violates constraint `{constraint}`")]
    ValueConstraint { value: Value, constraint: String },

    /// Un validador global (inter-parámetro) devolvió false.
    #[error("global validator '{name}' failed")]
    GlobalValidation { name: String },

    /// Clave ausente en acceso con puntos o en el target de un validador.
    #[error("no parameter '{name}' in the ParameterSet")]
    NotFound { name: String },

    /// Una asignación de `apply_config` falló; envuelve el error de
    /// restricción con el nombre del parámetro asignado.
    #[error("parameter '{name}': {source}")]
    Assignment {
        name: String,
        #[source]
        source: Box<ParamError>,
    },

    /// `generate_sweep_grid` sin ningún SweepParam: no hay producto
    /// cartesiano posible.
    #[error("no SweepParam entries in the set; cannot generate a sweep grid")]
    EmptySweep,
}

impl ParamError {
    /// Atajo para construir un `ValueConstraint`.
    pub(crate) fn constraint(value: &Value, constraint: impl Into<String>) -> Self {
        ParamError::ValueConstraint { value: value.clone(),
                                      constraint: constraint.into() }
    }

    /// Envuelve un error de restricción con el nombre del parámetro.
    pub(crate) fn assignment(name: impl Into<String>, source: ParamError) -> Self {
        ParamError::Assignment { name: name.into(),
                                 source: Box::new(source) }
    }
}

/// Errores estructurales del grafo de dependencias.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// El grafo contiene al menos un ciclo; se listan los nodos que
    /// participan en él.
    #[error("cyclic dependency between nodes: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),

    /// Un nodo declara una dependencia que no está registrada en el
    /// mismo Pipeline.
    #[error("node '{node}' depends on unregistered node '{dependency}'")]
    MissingDependency { node: String, dependency: String },

    /// Nombre de nodo repetido dentro de un Pipeline.
    #[error("a node named '{0}' is already registered in the pipeline")]
    DuplicateNode(String),
}

/// Errores del acceso a datos (DataProvider).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data stored under key '{0}'")]
    KeyNotFound(String),

    #[error("io error at '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error")]
    Serde(#[from] serde_json::Error),
}

/// Error devuelto por la unidad de trabajo de un nodo.
///
/// El contrato del nodo es deliberadamente opaco: cualquier fallo se
/// reduce a un mensaje que el orquestador envuelve en
/// [`EngineError::NodeExecution`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct NodeError(pub String);

impl NodeError {
    pub fn new(message: impl Into<String>) -> Self {
        NodeError(message.into())
    }
}

impl From<&str> for NodeError {
    fn from(message: &str) -> Self {
        NodeError(message.to_string())
    }
}

impl From<String> for NodeError {
    fn from(message: String) -> Self {
        NodeError(message)
    }
}

/// Error agregado de una corrida orquestada.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// Fallo no recuperado dentro del callable de un nodo.
    #[error("node '{node}' failed: {reason}")]
    NodeExecution { node: String, reason: String },
}
