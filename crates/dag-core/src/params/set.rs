//! `ParameterSet`: colección ordenada y jerárquica de parámetros.
//!
//! Cada entrada es una unión etiquetada: un `Param` hoja, un `SweepParam`
//! o un `ParameterSet` anidado. Un valor JSON suelto insertado en el set
//! se coacciona explícitamente a `Param` con ese valor como default. El
//! flag `strict` del set se estampa recursivamente sobre todo lo que se
//! inserta.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::ParamError;
use crate::params::validator::{GlobalArgs, GlobalValidator, ValidatorTargets};
use crate::params::{Param, SweepParam};

/// Entrada del set: hoja, barrido o subconjunto anidado.
#[derive(Debug, Clone)]
pub enum ParamEntry {
    Leaf(Param),
    Sweep(SweepParam),
    Nested(ParameterSet),
}

impl ParamEntry {
    /// Valor resuelto de la entrada. Para un subconjunto anidado es el
    /// objeto JSON con el snapshot resuelto de todas sus entradas; para
    /// un sweep es el valor del parámetro base (los candidatos sólo
    /// participan del grid).
    pub fn resolved(&self) -> Value {
        match self {
            ParamEntry::Leaf(param) => param.resolved(),
            ParamEntry::Sweep(sweep) => sweep.param().resolved(),
            ParamEntry::Nested(set) => Value::Object(set.to_config()),
        }
    }

    fn stamp_strict(&mut self, strict: bool) {
        match self {
            ParamEntry::Leaf(param) => param.set_strict(strict),
            ParamEntry::Sweep(sweep) => sweep.param_mut().set_strict(strict),
            ParamEntry::Nested(set) => set.set_strict_recursive(strict),
        }
    }
}

impl From<Param> for ParamEntry {
    fn from(param: Param) -> Self {
        ParamEntry::Leaf(param)
    }
}

impl From<SweepParam> for ParamEntry {
    fn from(sweep: SweepParam) -> Self {
        ParamEntry::Sweep(sweep)
    }
}

impl From<ParameterSet> for ParamEntry {
    fn from(set: ParameterSet) -> Self {
        ParamEntry::Nested(set)
    }
}

/// Regla de coacción: un valor suelto se envuelve como
/// `Param::with_default(value)`.
impl From<Value> for ParamEntry {
    fn from(value: Value) -> Self {
        ParamEntry::Leaf(Param::with_default(value))
    }
}

impl From<&str> for ParamEntry {
    fn from(value: &str) -> Self {
        ParamEntry::from(Value::from(value))
    }
}

impl From<String> for ParamEntry {
    fn from(value: String) -> Self {
        ParamEntry::from(Value::from(value))
    }
}

impl From<i64> for ParamEntry {
    fn from(value: i64) -> Self {
        ParamEntry::from(Value::from(value))
    }
}

impl From<f64> for ParamEntry {
    fn from(value: f64) -> Self {
        ParamEntry::from(Value::from(value))
    }
}

impl From<bool> for ParamEntry {
    fn from(value: bool) -> Self {
        ParamEntry::from(Value::from(value))
    }
}

/// Resultado de un acceso con puntos: valor de hoja o subconjunto
/// terminal.
#[derive(Debug, Clone)]
pub enum Resolved<'a> {
    /// Se alcanzó un parámetro hoja; su valor resuelto (Null = ausente).
    Value(Value),
    /// La cadena completa se recorrió sin tocar una hoja.
    Subset(&'a ParameterSet),
}

/// Colección ordenada de parámetros con validadores globales.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    entries: IndexMap<String, ParamEntry>,
    global_validators: Vec<GlobalValidator>,
    strict: bool,
}

impl ParameterSet {
    /// Set vacío en modo estricto.
    pub fn new() -> Self {
        Self { entries: IndexMap::new(),
               global_validators: Vec::new(),
               strict: true }
    }

    /// Set vacío en modo laxo: las asignaciones no validan.
    pub fn lenient() -> Self {
        Self { strict: false,
               ..Self::new() }
    }

    /// Inserción en estilo builder.
    pub fn with(mut self, name: impl Into<String>, entry: impl Into<ParamEntry>) -> Self {
        self.insert(name, entry);
        self
    }

    /// Inserta (o reemplaza) una entrada. Todo lo insertado recibe el
    /// modo estricto del set.
    pub fn insert(&mut self, name: impl Into<String>, entry: impl Into<ParamEntry>) {
        let mut entry = entry.into();
        entry.stamp_strict(self.strict);
        self.entries.insert(name.into(), entry);
    }

    /// Elimina una entrada; no hace nada si el nombre no existe.
    pub fn remove(&mut self, name: &str) {
        self.entries.shift_remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&ParamEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParamEntry> {
        self.entries.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamEntry)> {
        self.entries.iter()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn set_strict_recursive(&mut self, strict: bool) {
        self.strict = strict;
        for entry in self.entries.values_mut() {
            entry.stamp_strict(strict);
        }
    }

    /// Acceso con puntos (`"a.b.c"`): recorre subconjuntos anidados. En
    /// el momento en que se alcanza una hoja se devuelve su valor
    /// resuelto, ignorando los segmentos restantes. Si la cadena entera
    /// se recorre sin tocar una hoja, se devuelve el subconjunto
    /// terminal. Cualquier segmento faltante es `ParamError::NotFound`.
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>, ParamError> {
        let mut current = self;
        for segment in path.split('.') {
            match current.entries.get(segment) {
                Some(ParamEntry::Leaf(param)) => return Ok(Resolved::Value(param.resolved())),
                Some(ParamEntry::Sweep(sweep)) => return Ok(Resolved::Value(sweep.param().resolved())),
                Some(ParamEntry::Nested(set)) => current = set,
                None => {
                    return Err(ParamError::NotFound { name: path.to_string() });
                }
            }
        }
        Ok(Resolved::Subset(current))
    }

    /// Variante de `resolve` que siempre materializa un `Value`: un
    /// subconjunto terminal se devuelve como objeto resuelto.
    pub fn resolve_value(&self, path: &str) -> Result<Value, ParamError> {
        match self.resolve(path)? {
            Resolved::Value(value) => Ok(value),
            Resolved::Subset(set) => Ok(Value::Object(set.to_config())),
        }
    }

    /// Nuevo set sembrado con una copia de las entradas actuales más las
    /// sobreescrituras dadas. Cada sobreescritura reemplaza la entrada
    /// previa por completo (no hay merge campo a campo).
    pub fn override_with<I, K, E>(&self, overrides: I) -> Self
        where I: IntoIterator<Item = (K, E)>,
              K: Into<String>,
              E: Into<ParamEntry>
    {
        let mut out = self.clone();
        for (name, entry) in overrides {
            out.insert(name, entry);
        }
        out
    }

    /// Merge no destructivo: todas las entradas del receptor más las de
    /// `other`. Una clave ya presente sólo se reemplaza si `overwrite`.
    pub fn merge(&self, other: &ParameterSet, overwrite: bool) -> Self {
        let mut out = self.clone();
        for (name, entry) in &other.entries {
            if overwrite || !out.entries.contains_key(name) {
                out.insert(name.clone(), entry.clone());
            }
        }
        out
    }

    /// Adjunta un predicado a un parámetro existente (acepta rutas con
    /// puntos hacia hojas anidadas). Falla con `NotFound` si el target
    /// no es una hoja del set.
    pub fn add_validator(&mut self,
                         target: &str,
                         predicate: impl Fn(&Value) -> bool + Send + Sync + 'static)
                         -> Result<(), ParamError> {
        let param = self.leaf_mut(target)?;
        param.add_validator(predicate);
        Ok(())
    }

    fn leaf_mut(&mut self, path: &str) -> Result<&mut Param, ParamError> {
        let mut current = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            let last = segments.peek().is_none();
            match current.entries.get_mut(segment) {
                Some(ParamEntry::Leaf(param)) if last => return Ok(param),
                Some(ParamEntry::Sweep(sweep)) if last => return Ok(sweep.param_mut()),
                Some(ParamEntry::Nested(set)) if !last => current = set,
                _ => break,
            }
        }
        Err(ParamError::NotFound { name: path.to_string() })
    }

    /// Registra un invariante inter-parámetro. El nombre identifica al
    /// validador en el error que produce al fallar.
    pub fn add_global_validator(&mut self,
                                name: impl Into<String>,
                                check: impl Fn(&GlobalArgs) -> bool + Send + Sync + 'static,
                                targets: ValidatorTargets) {
        self.global_validators.push(GlobalValidator::new(name, check, targets));
    }

    pub fn global_validators(&self) -> &[GlobalValidator] {
        &self.global_validators
    }

    /// Valida el set completo.
    ///
    /// 1. Barrido diagnóstico por parámetro: cada hoja se valida contra
    ///    su propio valor resuelto; un fallo se loguea y se continúa con
    ///    el resto (no es una compuerta).
    /// 2. Validadores globales: resolver los targets y evaluar cada
    ///    predicado. Un predicado en false es fatal.
    pub fn validate(&self) -> Result<(), ParamError> {
        self.validate_entries();
        self.validate_globals()
    }

    fn validate_entries(&self) {
        for (name, entry) in &self.entries {
            match entry {
                ParamEntry::Leaf(param) => {
                    if let Err(err) = param.validate(&param.resolved()) {
                        warn!(param = %name, error = %err, "parameter failed validation");
                    }
                }
                ParamEntry::Sweep(sweep) => {
                    if let Err(err) = sweep.validate() {
                        warn!(param = %name, error = %err, "sweep candidate failed validation");
                    }
                }
                ParamEntry::Nested(set) => set.validate_entries(),
            }
        }
    }

    fn validate_globals(&self) -> Result<(), ParamError> {
        for validator in &self.global_validators {
            let args = match validator.targets() {
                ValidatorTargets::Positional(names) => {
                    let values = names.iter()
                                      .map(|name| self.resolve_value(name))
                                      .collect::<Result<Vec<_>, _>>()?;
                    GlobalArgs::Positional(values)
                }
                ValidatorTargets::Keyword(bindings) => {
                    let mut values = IndexMap::new();
                    for (arg, name) in bindings {
                        values.insert(arg.clone(), self.resolve_value(name)?);
                    }
                    GlobalArgs::Keyword(values)
                }
            };
            if !(validator.check)(&args) {
                return Err(ParamError::GlobalValidation { name: validator.name.clone() });
            }
        }
        for entry in self.entries.values() {
            if let ParamEntry::Nested(set) = entry {
                set.validate_globals()?;
            }
        }
        Ok(())
    }

    /// Aplica valores de configuración de runtime.
    ///
    /// Para cada clave presente en el set, si la misma clave existe en
    /// `config` se asigna vía `set_value` (la validación estricta corre
    /// como efecto; la primera asignación inválida es fatal y corta la
    /// aplicación). Claves del set ausentes en `config` quedan intactas;
    /// claves de `config` sin parámetro correspondiente se ignoran. Un
    /// objeto anidado recurre en el subconjunto correspondiente.
    pub fn apply_config(&mut self, config: &Value) -> Result<(), ParamError> {
        let Some(values) = config.as_object() else {
            return Ok(());
        };
        for (name, entry) in self.entries.iter_mut() {
            let Some(incoming) = values.get(name) else {
                continue;
            };
            match entry {
                ParamEntry::Leaf(param) => {
                    param.set_value(incoming.clone())
                         .map_err(|err| ParamError::assignment(name.clone(), err))?;
                }
                ParamEntry::Sweep(sweep) => {
                    sweep.param_mut()
                         .set_value(incoming.clone())
                         .map_err(|err| ParamError::assignment(name.clone(), err))?;
                }
                ParamEntry::Nested(set) => {
                    set.apply_config(incoming)
                       .map_err(|err| ParamError::assignment(name.clone(), err))?;
                }
            }
        }
        Ok(())
    }

    /// Snapshot resuelto del set como objeto JSON (recursivo). Valores
    /// ausentes se materializan como `Null`.
    pub fn to_config(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for (name, entry) in &self.entries {
            out.insert(name.clone(), entry.resolved());
        }
        out
    }

    /// Genera la secuencia de configuraciones del barrido.
    ///
    /// Particiona las entradas en variables (SweepParam) y fijas; el
    /// resultado es el producto cartesiano, en orden de inserción, de las
    /// secuencias de candidatos de todos los SweepParams, con los valores
    /// resueltos de las entradas fijas copiados sin cambio en cada
    /// configuración. Falla con `EmptySweep` si no hay ningún SweepParam.
    pub fn generate_sweep_grid(&self) -> Result<Vec<Map<String, Value>>, ParamError> {
        let mut sweeps: Vec<(&String, &[Value])> = Vec::new();
        let mut fixed = Map::new();
        for (name, entry) in &self.entries {
            match entry {
                ParamEntry::Sweep(sweep) => sweeps.push((name, sweep.values())),
                other => {
                    fixed.insert(name.clone(), other.resolved());
                }
            }
        }
        if sweeps.is_empty() {
            return Err(ParamError::EmptySweep);
        }

        let total: usize = sweeps.iter().map(|(_, values)| values.len()).product();
        let mut grid = Vec::with_capacity(total);
        let mut indices = vec![0usize; sweeps.len()];
        for _ in 0..total {
            let mut config = fixed.clone();
            for ((name, values), &index) in sweeps.iter().zip(&indices) {
                config.insert((*name).clone(), values[index].clone());
            }
            grid.push(config);
            // odómetro: la última posición avanza más rápido
            for position in (0..indices.len()).rev() {
                indices[position] += 1;
                if indices[position] < sweeps[position].1.len() {
                    break;
                }
                indices[position] = 0;
            }
        }
        Ok(grid)
    }
}
