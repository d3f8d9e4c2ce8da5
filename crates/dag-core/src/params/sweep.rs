//! `SweepParam`: un parámetro con secuencia ordenada de candidatos para
//! expansión combinatoria. Participa en la generación del grid, nunca en
//! una ejecución de valor único directamente.

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::errors::ParamError;
use crate::params::Param;

#[derive(Debug, Clone)]
pub struct SweepParam {
    base: Param,
    values: Vec<Value>,
}

impl SweepParam {
    /// Sweep sin restricciones adicionales sobre los candidatos.
    pub fn new(values: Vec<Value>) -> Self {
        Self { base: Param::new(),
               values }
    }

    /// Sweep cuyos candidatos deben satisfacer las restricciones de `base`.
    pub fn with_param(base: Param, values: Vec<Value>) -> Self {
        Self { base, values }
    }

    /// Secuencia de candidatos declarada, tal cual.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Valida el sweep: la secuencia de candidatos no puede ser vacía y
    /// cada candidato debe pasar las restricciones del parámetro base;
    /// corta en el primer candidato inválido.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.values.is_empty() {
            return Err(ParamError::constraint(&Value::Null, "at least one sweep candidate"));
        }
        for value in &self.values {
            self.base.validate(value)?;
        }
        Ok(())
    }

    pub fn param(&self) -> &Param {
        &self.base
    }

    pub fn param_mut(&mut self) -> &mut Param {
        &mut self.base
    }
}

impl Deref for SweepParam {
    type Target = Param;

    fn deref(&self) -> &Param {
        &self.base
    }
}

impl DerefMut for SweepParam {
    fn deref_mut(&mut self) -> &mut Param {
        &mut self.base
    }
}
