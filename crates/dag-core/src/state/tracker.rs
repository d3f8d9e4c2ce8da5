//! `StateTracker`: registro del estado de ejecución por nodo.
//!
//! El tracker no valida transiciones; el orquestador es quien respeta la
//! secuencia legal `not_started → running → {completed, failed}`. Un id
//! nunca consultado está `not_started` por defecto. Los hooks
//! `log_start` / `log_end` son observabilidad pura y no alteran la
//! semántica de ejecución.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::NodeOutputs;

/// Estado de un nodo en tiempo de ejecución.
///
/// Las transiciones válidas (aplicadas por el orquestador) son:
/// - `NotStarted` -> `Running`
/// - `Running` -> `Completed`
/// - `Running` -> `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    NotStarted,
    Running,
    Completed,
    Failed,
}

/// Registro almacenado: estado más el instante de la última transición.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StateRecord {
    pub state: ExecutionState,
    pub updated_at: DateTime<Utc>,
}

/// Contrato de seguimiento de estado, keyed por identidad de nodo.
///
/// Implementaciones con respaldo durable permiten reanudar corridas
/// entre invocaciones del orquestador; el layout persistido queda a
/// cargo de la implementación.
pub trait StateTracker: Send + Sync {
    /// Estado actual; `NotStarted` para ids nunca actualizados. No falla.
    fn get_state(&self, node_id: &str) -> ExecutionState;

    /// Sobreescritura incondicional del estado.
    fn update_state(&self, node_id: &str, state: ExecutionState);

    /// Hook de auditoría al comenzar la invocación de un nodo.
    fn log_start(&self, node: &str) {
        info!(node = %node, "node execution started");
    }

    /// Hook de auditoría al terminar la invocación de un nodo.
    fn log_end(&self, node: &str, outputs: &NodeOutputs) {
        info!(node = %node, outputs = outputs.len(), "node execution finished");
    }
}

/// Tracker en memoria sobre un mapa concurrente: las transiciones de
/// ids distintos no compiten y cada id se actualiza de forma atómica.
#[derive(Debug, Default)]
pub struct InMemoryStateTracker {
    states: DashMap<String, StateRecord>,
}

impl InMemoryStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registro completo (estado + timestamp), si existe.
    pub fn record(&self, node_id: &str) -> Option<StateRecord> {
        self.states.get(node_id).map(|r| *r)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl StateTracker for InMemoryStateTracker {
    fn get_state(&self, node_id: &str) -> ExecutionState {
        self.states
            .get(node_id)
            .map(|r| r.state)
            .unwrap_or(ExecutionState::NotStarted)
    }

    fn update_state(&self, node_id: &str, state: ExecutionState) {
        self.states.insert(node_id.to_string(),
                           StateRecord { state,
                                         updated_at: Utc::now() });
    }
}
