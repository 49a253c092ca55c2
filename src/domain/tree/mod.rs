pub mod builder;
pub mod node;

pub use builder::{build_tree, build_tree_with};
pub use node::{Side, TreeNode};
