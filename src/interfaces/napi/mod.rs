pub mod options;
pub mod tree;
