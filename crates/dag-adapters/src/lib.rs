//! dag-adapters: implementaciones concretas sobre el core.
//!
//! Este crate provee:
//! - `JsonDirProvider`: un `DataProvider` respaldado por un directorio
//!   de archivos JSON, suficiente para reanudar corridas entre procesos.
//! - Nodos de ejemplo (`nodes`) que implementan `NodeDefinition`
//!   directamente, como referencia para definir nodos propios sin pasar
//!   por `FnNode`.
//!
//! El core sólo conoce keys opacas y `Value`; la resolución key → path
//! y el formato en disco viven acá.

pub mod nodes;
pub mod providers;

pub use nodes::{GenerateSeriesNode, MovingAverageNode, SeriesSpec, SummarizeNode};
pub use providers::JsonDirProvider;
