#![deny(clippy::all)]

#[cfg(feature = "napi")]
#[macro_use]
extern crate napi_derive;

pub mod domain;
pub mod error;
pub mod logging;

#[cfg(feature = "napi")]
mod interfaces;

pub use domain::{
    hash::{
        sha256::{DigestHasher, Sha256Hasher, Sha512Hasher},
        HashFunction,
    },
    leaf::{BinaryEncode, Leaf, LeafError, ReadLeaf},
    options::{Parallelism, TreeOptions},
    tree::{build_tree, build_tree_with, TreeNode},
};
pub use error::BuildError;

#[cfg(feature = "napi")]
#[napi]
pub fn init() {
  std::panic::set_hook(Box::new(|_| {}));
  logging::init();
}
