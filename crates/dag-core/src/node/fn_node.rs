//! `FnNode`: nodo concreto respaldado por una closure.

use std::fmt;
use std::sync::Arc;

use crate::errors::NodeError;
use crate::model::{ExecutionContext, NodeOutputs};
use crate::node::NodeDefinition;

type NodeFn = Arc<dyn Fn(&ExecutionContext) -> Result<NodeOutputs, NodeError> + Send + Sync>;

/// Nodo definido a partir de una función más metadatos.
#[derive(Clone)]
pub struct FnNode {
    name: String,
    dependencies: Vec<String>,
    checkpointable: bool,
    func: NodeFn,
}

impl FnNode {
    pub fn new(name: impl Into<String>,
               func: impl Fn(&ExecutionContext) -> Result<NodeOutputs, NodeError> + Send + Sync + 'static)
               -> Self {
        Self { name: name.into(),
               dependencies: Vec::new(),
               checkpointable: false,
               func: Arc::new(func) }
    }

    /// Declara las dependencias del nodo (orden preservado).
    pub fn after<I, S>(mut self, dependencies: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Marca al nodo como checkpointable: una corrida reanudada puede
    /// saltearlo si ya está completado.
    pub fn checkpoint(mut self) -> Self {
        self.checkpointable = true;
        self
    }
}

impl NodeDefinition for FnNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    fn checkpointable(&self) -> bool {
        self.checkpointable
    }

    fn run(&self, ctx: &ExecutionContext) -> Result<NodeOutputs, NodeError> {
        (self.func)(ctx)
    }
}

impl fmt::Debug for FnNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnNode")
         .field("name", &self.name)
         .field("dependencies", &self.dependencies)
         .field("checkpointable", &self.checkpointable)
         .finish()
    }
}
