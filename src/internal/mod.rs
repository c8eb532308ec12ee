mod arena;
mod node;

pub(crate) use arena::Arena;
pub(crate) use node::{Cursor, Head, Node, NodeId};
