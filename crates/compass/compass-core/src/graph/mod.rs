//! Knowledge graph value types: nodes, edges, and the clamped [`Rate`].

mod edge;
mod node;
mod rate;

pub use edge::{GraphEdge, Relationship};
pub use node::{Effort, GraphNode, NodeType};
pub use rate::Rate;
