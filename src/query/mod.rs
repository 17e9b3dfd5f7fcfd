pub mod branch;
pub mod builder;
pub mod node;

pub use branch::QueryBranch;
pub use builder::QueryBuilder;
pub use node::{Occur, QueryNode};
