//! `Pipeline`: el contenedor del DAG.
//!
//! Posee una colección ordenada de nodos (el orden de inserción es el
//! orden de registro, no necesariamente el de ejecución) y un
//! `ParameterSet`. Toda dependencia declarada por un nodo debe referirse
//! a un nodo del mismo Pipeline; las referencias colgantes se rechazan en
//! el momento en que se necesita resolver dependencias (scheduling).

use std::fmt;

use indexmap::IndexMap;

use crate::errors::GraphError;
use crate::node::NodeDefinition;
use crate::params::ParameterSet;

pub struct Pipeline {
    name: String,
    nodes: IndexMap<String, Box<dyn NodeDefinition>>,
    params: ParameterSet,
}

impl Pipeline {
    /// Pipeline vacío con un ParameterSet estricto.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_params(name, ParameterSet::new())
    }

    pub fn with_params(name: impl Into<String>, params: ParameterSet) -> Self {
        Self { name: name.into(),
               nodes: IndexMap::new(),
               params }
    }

    /// Registra un nodo. Los nombres son únicos dentro del Pipeline.
    pub fn add_node(&mut self, node: impl NodeDefinition + 'static) -> Result<(), GraphError> {
        let name = node.name().to_string();
        if self.nodes.contains_key(&name) {
            return Err(GraphError::DuplicateNode(name));
        }
        self.nodes.insert(name, Box::new(node));
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self, name: &str) -> Option<&dyn NodeDefinition> {
        self.nodes.get(name).map(|n| n.as_ref())
    }

    /// Nombres de nodos en orden de registro.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &dyn NodeDefinition> {
        self.nodes.values().map(|n| n.as_ref())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
         .field("name", &self.name)
         .field("nodes", &self.nodes.keys().collect::<Vec<_>>())
         .field("params", &self.params.len())
         .finish()
    }
}
