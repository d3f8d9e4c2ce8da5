//! Nodos: unidades de cómputo con dependencias declaradas.

pub mod definition;
pub mod fn_node;

pub use definition::NodeDefinition;
pub use fn_node::FnNode;
