//! Representación en memoria del DAG de un Pipeline.
//!
//! Guarda adyacencia directa (dependencias) e inversa (dependientes)
//! keyed por nombre de nodo, más el orden de registro. Expone el orden
//! parcial del grafo (`execution_levels`) para que una implementación
//! pueda correr nodos mutuamente independientes en paralelo.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::errors::GraphError;
use crate::pipeline::Pipeline;

#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Nombres en orden de registro.
    order: Vec<String>,
    /// Dependencias directas por nodo.
    dependencies: IndexMap<String, Vec<String>>,
    /// Dependientes directos por nodo.
    dependents: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Construye el grafo validando que toda dependencia refiera a un
    /// nodo registrado en el mismo Pipeline.
    pub fn from_pipeline(pipeline: &Pipeline) -> Result<Self, GraphError> {
        let order: Vec<String> = pipeline.node_names().map(str::to_string).collect();

        let mut dependencies: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut dependents: IndexMap<String, Vec<String>> = IndexMap::new();
        for name in &order {
            dependencies.insert(name.clone(), Vec::new());
            dependents.insert(name.clone(), Vec::new());
        }

        for node in pipeline.nodes() {
            for dep in node.dependencies() {
                if !dependencies.contains_key(dep) {
                    return Err(GraphError::MissingDependency { node: node.name().to_string(),
                                                               dependency: dep.clone() });
                }
                dependencies.get_mut(node.name())
                            .map(|deps| deps.push(dep.clone()));
                dependents.get_mut(dep)
                          .map(|deps| deps.push(node.name().to_string()));
            }
        }

        Ok(Self { order,
                  dependencies,
                  dependents })
    }

    /// Nombres de nodos en orden de registro.
    pub fn node_names(&self) -> &[String] {
        &self.order
    }

    /// Dependencias directas de un nodo.
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.dependencies.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Dependientes directos de un nodo.
    pub fn dependents_of(&self, name: &str) -> &[String] {
        self.dependents.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Nodos sin dependencias (raíces del DAG).
    pub fn roots(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|name| self.dependencies_of(name).is_empty())
            .map(|s| s.as_str())
            .collect()
    }

    /// Orden parcial del grafo como olas de dependencia: los nodos de un
    /// mismo nivel no tienen relación transitiva entre sí y pueden
    /// ejecutarse concurrentemente; cada nivel sólo depende de niveles
    /// anteriores. Falla con `CyclicDependency` si el grafo tiene ciclos.
    pub fn execution_levels(&self) -> Result<Vec<Vec<String>>, GraphError> {
        let mut emitted: HashSet<String> = HashSet::new();
        let mut levels: Vec<Vec<String>> = Vec::new();

        while emitted.len() < self.order.len() {
            let level: Vec<String> = self.order
                                         .iter()
                                         .filter(|name| !emitted.contains(name.as_str()))
                                         .filter(|name| {
                                             self.dependencies_of(name)
                                                 .iter()
                                                 .all(|dep| emitted.contains(dep.as_str()))
                                         })
                                         .cloned()
                                         .collect();
            if level.is_empty() {
                let remaining: Vec<String> = self.order
                                                 .iter()
                                                 .filter(|name| !emitted.contains(name.as_str()))
                                                 .cloned()
                                                 .collect();
                return Err(GraphError::CyclicDependency(self.cycle_members(remaining)));
            }
            emitted.extend(level.iter().cloned());
            levels.push(level);
        }

        Ok(levels)
    }

    /// Reduce un conjunto de nodos sin orden posible a los miembros
    /// reales de algún ciclo: poda iterativamente los nodos sin
    /// dependencias ni dependientes dentro del conjunto restante.
    pub(crate) fn cycle_members(&self, remaining: Vec<String>) -> Vec<String> {
        let mut members: HashSet<String> = remaining.into_iter().collect();
        loop {
            let prunable: Vec<String> = members.iter()
                                               .filter(|name| {
                                                   let no_deps_inside = self.dependencies_of(name)
                                                                            .iter()
                                                                            .all(|d| !members.contains(d));
                                                   let no_dependents_inside = self.dependents_of(name)
                                                                                  .iter()
                                                                                  .all(|d| !members.contains(d));
                                                   no_deps_inside || no_dependents_inside
                                               })
                                               .cloned()
                                               .collect();
            if prunable.is_empty() {
                break;
            }
            for name in prunable {
                members.remove(&name);
            }
        }
        // orden de registro para un mensaje determinista
        self.order.iter().filter(|name| members.contains(*name)).cloned().collect()
    }
}
