//! Sistema de parámetros tipados: valores validados, colecciones
//! jerárquicas y generación de grids de barrido.

pub mod param;
pub mod set;
pub mod sweep;
pub mod validator;

pub use param::{Param, ParamType, Predicate};
pub use set::{ParamEntry, ParameterSet, Resolved};
pub use sweep::SweepParam;
pub use validator::{GlobalArgs, GlobalValidator, ValidatorTargets};
