//! `Param`: un valor de configuración con restricciones declaradas.
//!
//! Un `Param` lleva un valor opcional fijado en runtime, un default, y un
//! conjunto de restricciones (tipo, cotas numéricas, patrón, opciones,
//! predicados). La resolución de lectura es: valor explícito si existe,
//! si no el default, si no ausente. `validate` corre los chequeos en un
//! orden fijo y corta en el primero que falla.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::errors::ParamError;

/// Predicado de validación sobre un valor candidato.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Tipo JSON declarado para un parámetro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl ParamType {
    /// Chequea si `value` pertenece al tipo declarado. `Number` acepta
    /// cualquier numérico; `Integer` sólo enteros.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::Boolean => value.is_boolean(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Number => value.is_number(),
            ParamType::String => value.is_string(),
            ParamType::Array => value.is_array(),
            ParamType::Object => value.is_object(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Boolean => "boolean",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::Array => "array",
            ParamType::Object => "object",
        };
        f.write_str(name)
    }
}

/// Parámetro individual con restricciones de validación.
#[derive(Clone)]
pub struct Param {
    value: Option<Value>,
    default: Option<Value>,
    param_type: Option<ParamType>,
    gt: Option<f64>,
    ge: Option<f64>,
    lt: Option<f64>,
    le: Option<f64>,
    options: Option<Vec<Value>>,
    pattern: Option<Regex>,
    validators: Vec<Predicate>,
    strict: bool,
}

impl Param {
    /// Parámetro vacío en modo estricto (el modo por defecto del sistema).
    pub fn new() -> Self {
        Self { value: None,
               default: None,
               param_type: None,
               gt: None,
               ge: None,
               lt: None,
               le: None,
               options: None,
               pattern: None,
               validators: Vec::new(),
               strict: true }
    }

    /// Parámetro con valor por defecto.
    pub fn with_default(default: impl Into<Value>) -> Self {
        Self::new().default_value(default)
    }

    // ---- builders ----

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn of_type(mut self, param_type: ParamType) -> Self {
        self.param_type = Some(param_type);
        self
    }

    /// Cota estricta inferior: el valor debe ser `> bound`.
    pub fn gt(mut self, bound: f64) -> Self {
        self.gt = Some(bound);
        self
    }

    /// Cota inferior inclusiva: el valor debe ser `>= bound`.
    pub fn ge(mut self, bound: f64) -> Self {
        self.ge = Some(bound);
        self
    }

    /// Cota estricta superior: el valor debe ser `< bound`.
    pub fn lt(mut self, bound: f64) -> Self {
        self.lt = Some(bound);
        self
    }

    /// Cota superior inclusiva: el valor debe ser `<= bound`.
    pub fn le(mut self, bound: f64) -> Self {
        self.le = Some(bound);
        self
    }

    /// Conjunto finito de valores permitidos.
    pub fn options(mut self, options: Vec<Value>) -> Self {
        self.options = Some(options);
        self
    }

    /// Patrón que el valor (o su representación textual) debe satisfacer.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Agrega un predicado de validación en estilo builder.
    pub fn validator(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validators.push(Arc::new(predicate));
        self
    }

    /// Desactiva el modo estricto: `set_value` almacena sin validar.
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    // ---- mutadores / accesores ----

    /// Agrega un predicado; las validaciones posteriores lo incluyen.
    pub fn add_validator(&mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) {
        self.validators.push(Arc::new(predicate));
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Valida un candidato contra todas las restricciones declaradas.
    ///
    /// Orden fijo: tipo → gt → ge → lt → le → patrón → opciones →
    /// predicados. El primer chequeo que falla corta la validación; los
    /// posteriores no corren.
    pub fn validate(&self, candidate: &Value) -> Result<(), ParamError> {
        if let Some(expected) = self.param_type {
            if !expected.matches(candidate) {
                return Err(ParamError::TypeConstraint { expected,
                                                        value: candidate.clone() });
            }
        }
        if let Some(bound) = self.gt {
            if !(numeric(candidate, "gt", bound)? > bound) {
                return Err(ParamError::constraint(candidate, format!("gt {bound}")));
            }
        }
        if let Some(bound) = self.ge {
            if !(numeric(candidate, "ge", bound)? >= bound) {
                return Err(ParamError::constraint(candidate, format!("ge {bound}")));
            }
        }
        if let Some(bound) = self.lt {
            if !(numeric(candidate, "lt", bound)? < bound) {
                return Err(ParamError::constraint(candidate, format!("lt {bound}")));
            }
        }
        if let Some(bound) = self.le {
            if !(numeric(candidate, "le", bound)? <= bound) {
                return Err(ParamError::constraint(candidate, format!("le {bound}")));
            }
        }
        if let Some(re) = &self.pattern {
            let text = match candidate {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if !re.is_match(&text) {
                return Err(ParamError::constraint(candidate, format!("pattern {}", re.as_str())));
            }
        }
        if let Some(options) = &self.options {
            if !options.contains(candidate) {
                return Err(ParamError::constraint(candidate, format!("options {}", Value::Array(options.clone()))));
            }
        }
        for predicate in &self.validators {
            if !predicate(candidate) {
                return Err(ParamError::constraint(candidate, "custom validator"));
            }
        }
        Ok(())
    }

    /// Fija el valor en runtime. En modo estricto valida primero y
    /// propaga el fallo; en modo laxo almacena sin chequear.
    pub fn set_value(&mut self, value: Value) -> Result<(), ParamError> {
        if self.strict {
            self.validate(&value)?;
        }
        self.value = Some(value);
        Ok(())
    }

    /// Valor resuelto: el explícito si fue fijado, si no el default, si
    /// no `None`. Nunca falla.
    pub fn get_value(&self) -> Option<&Value> {
        self.value.as_ref().or(self.default.as_ref())
    }

    /// Valor resuelto como JSON, con `Null` como centinela de ausencia.
    pub fn resolved(&self) -> Value {
        self.get_value().cloned().unwrap_or(Value::Null)
    }
}

impl Default for Param {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
         .field("value", &self.value)
         .field("default", &self.default)
         .field("param_type", &self.param_type)
         .field("gt", &self.gt)
         .field("ge", &self.ge)
         .field("lt", &self.lt)
         .field("le", &self.le)
         .field("options", &self.options)
         .field("pattern", &self.pattern.as_ref().map(|re| re.as_str()))
         .field("validators", &self.validators.len())
         .field("strict", &self.strict)
         .finish()
    }
}

/// Interpreta el candidato como numérico para una comparación de cota;
/// un valor no numérico viola la cota directamente.
fn numeric(candidate: &Value, bound_name: &str, bound: f64) -> Result<f64, ParamError> {
    candidate.as_f64()
             .ok_or_else(|| ParamError::constraint(candidate, format!("{bound_name} {bound}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_value_over_default() {
        let mut param = Param::with_default(json!(42));
        assert_eq!(param.resolved(), json!(42));
        param.set_value(json!(7)).unwrap();
        assert_eq!(param.resolved(), json!(7));
    }

    #[test]
    fn absent_param_resolves_to_none() {
        let param = Param::new();
        assert!(param.get_value().is_none());
        assert_eq!(param.resolved(), Value::Null);
    }

    #[test]
    fn type_check_runs_before_bounds() {
        // un string contra Integer + gt debe reportar el tipo, no la cota
        let param = Param::new().of_type(ParamType::Integer).gt(0.0);
        let err = param.validate(&json!("nope")).unwrap_err();
        assert!(matches!(err, ParamError::TypeConstraint { .. }));
    }

    #[test]
    fn lenient_param_stores_invalid_values() {
        let mut param = Param::new().gt(10.0).lenient();
        param.set_value(json!(1)).unwrap();
        assert_eq!(param.resolved(), json!(1));
    }

    #[test]
    fn strict_param_rejects_invalid_assignment() {
        let mut param = Param::new().gt(10.0);
        let err = param.set_value(json!(1)).unwrap_err();
        assert!(err.to_string().contains("gt 10"));
        // el valor no quedó almacenado
        assert!(param.get_value().is_none());
    }

    #[test]
    fn custom_validator_participates() {
        let param = Param::new().validator(|v| v.as_i64().map(|n| n % 2 == 0).unwrap_or(false));
        assert!(param.validate(&json!(4)).is_ok());
        assert!(param.validate(&json!(3)).is_err());
    }

    #[test]
    fn pattern_applies_to_string_repr() {
        let param = Param::new().pattern(Regex::new(r"^[A-Z]{3}$").unwrap());
        assert!(param.validate(&json!("ABC")).is_ok());
        assert!(param.validate(&json!("abc")).is_err());
    }
}
