//! Acceso a datos: el colaborador externo que provee y persiste
//! entradas y salidas de nodos.

pub mod provider;

pub use provider::{DataProvider, InMemoryDataProvider};
