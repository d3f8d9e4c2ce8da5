//! Validadores globales: invariantes que relacionan varios parámetros.
//!
//! El target de un validador es una unión explícita de dos variantes:
//! lista posicional de nombres o mapeo nombre-de-argumento → nombre-de-
//! parámetro. El predicado recibe los valores ya resueltos bajo la misma
//! forma (`GlobalArgs`).

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// Especificación de los parámetros sobre los que aplica un validador.
#[derive(Debug, Clone)]
pub enum ValidatorTargets {
    /// Nombres de parámetros, ligados por posición.
    Positional(Vec<String>),
    /// Nombre de argumento → nombre de parámetro en el set.
    Keyword(IndexMap<String, String>),
}

/// Valores resueltos entregados al predicado, con la misma forma que los
/// targets declarados.
#[derive(Debug, Clone)]
pub enum GlobalArgs {
    Positional(Vec<Value>),
    Keyword(IndexMap<String, Value>),
}

impl GlobalArgs {
    /// Valor en la posición `index` (variante posicional).
    pub fn get(&self, index: usize) -> Option<&Value> {
        match self {
            GlobalArgs::Positional(values) => values.get(index),
            GlobalArgs::Keyword(_) => None,
        }
    }

    /// Valor ligado al argumento `name` (variante keyword).
    pub fn arg(&self, name: &str) -> Option<&Value> {
        match self {
            GlobalArgs::Positional(_) => None,
            GlobalArgs::Keyword(values) => values.get(name),
        }
    }
}

pub type GlobalPredicate = Arc<dyn Fn(&GlobalArgs) -> bool + Send + Sync>;

/// Predicado nombrado junto con sus targets. El nombre identifica al
/// validador en el error fatal que produce al fallar.
#[derive(Clone)]
pub struct GlobalValidator {
    pub(crate) name: String,
    pub(crate) targets: ValidatorTargets,
    pub(crate) check: GlobalPredicate,
}

impl GlobalValidator {
    pub fn new(name: impl Into<String>,
               check: impl Fn(&GlobalArgs) -> bool + Send + Sync + 'static,
               targets: ValidatorTargets)
               -> Self {
        Self { name: name.into(),
               targets,
               check: Arc::new(check) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn targets(&self) -> &ValidatorTargets {
        &self.targets
    }
}

impl fmt::Debug for GlobalValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalValidator")
         .field("name", &self.name)
         .field("targets", &self.targets)
         .finish()
    }
}
