//! Scheduler: orden total de ejecución a partir del grafo.
//!
//! `resolve_dependencies` es la única función pura y sin estado del
//! core: la misma topología de Pipeline produce siempre el mismo orden.

use std::collections::BTreeSet;

use crate::errors::GraphError;
use crate::pipeline::Pipeline;
use crate::scheduling::DependencyGraph;

/// Contrato de scheduling sobre un Pipeline.
pub trait Scheduler {
    /// Orden topológico determinista del grafo de dependencias. Los
    /// nodos sin restricción de orden relativa preservan el orden de
    /// registro del Pipeline.
    fn resolve_dependencies(&self, pipeline: &Pipeline) -> Result<Vec<String>, GraphError>;
}

/// Scheduler por defecto: sort topológico de Kahn con desempate por
/// índice de registro.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyScheduler;

impl DependencyScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for DependencyScheduler {
    fn resolve_dependencies(&self, pipeline: &Pipeline) -> Result<Vec<String>, GraphError> {
        let graph = DependencyGraph::from_pipeline(pipeline)?;
        topological_order(&graph)
    }
}

/// Kahn sobre índices de registro. El frente de nodos listos se mantiene
/// en un `BTreeSet`, de modo que el nodo registrado primero sale primero
/// entre los que no tienen restricción relativa.
pub fn topological_order(graph: &DependencyGraph) -> Result<Vec<String>, GraphError> {
    let names = graph.node_names();
    let index_of = |name: &str| names.iter().position(|n| n == name);

    let mut pending: Vec<usize> = names.iter()
                                       .map(|name| graph.dependencies_of(name).len())
                                       .collect();
    let mut ready: BTreeSet<usize> = pending.iter()
                                            .enumerate()
                                            .filter(|(_, &deps)| deps == 0)
                                            .map(|(i, _)| i)
                                            .collect();

    let mut order = Vec::with_capacity(names.len());
    while let Some(&next) = ready.iter().next() {
        ready.remove(&next);
        let name = &names[next];
        order.push(name.clone());
        for dependent in graph.dependents_of(name) {
            if let Some(i) = index_of(dependent) {
                pending[i] -= 1;
                if pending[i] == 0 {
                    ready.insert(i);
                }
            }
        }
    }

    if order.len() < names.len() {
        let remaining: Vec<String> = names.iter()
                                          .filter(|name| !order.contains(name))
                                          .cloned()
                                          .collect();
        return Err(GraphError::CyclicDependency(graph.cycle_members(remaining)));
    }
    Ok(order)
}
