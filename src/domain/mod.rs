pub mod hash;
pub mod leaf;
pub mod options;
pub mod tree;
