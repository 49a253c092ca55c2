use super::options::HashTreeOptionsJs;
use crate::domain::{
  hash::sha256::{hash_sha256, Sha256Hasher},
  options::TreeOptions,
  tree::{build_tree_with, Side, TreeNode},
};
use anyhow::Context;
use napi::bindgen_prelude::Uint8Array;
use std::sync::Arc;

/// JavaScript-facing SHA-256 hash tree.
///
/// Child handles share the built tree and remember the path from its root,
/// so walking the tree from JS never copies subtrees.
#[napi(js_name = "HashTree")]
pub struct HashTreeJs {
  root: Arc<TreeNode>,
  path: Vec<Side>,
}

#[napi]
impl HashTreeJs {
  #[napi]
  pub fn hash(data: Uint8Array) -> Uint8Array {
    hash_sha256(&data).to_vec().into()
  }

  #[napi(factory, catch_unwind)]
  pub fn from_leaves(
    leaves: Vec<Uint8Array>,
    options: Option<HashTreeOptionsJs>,
  ) -> napi::Result<Self> {
    // typed arrays stay on the JS thread; copy before handing off to rayon
    let data: Vec<Vec<u8>> = leaves.iter().map(|l| l.to_vec()).collect();
    build(data, options.unwrap_or_default())
      .map(|tree| Self {
        root: Arc::new(tree),
        path: Vec::new(),
      })
      .map_err(|e| napi::Error::from_reason(format!("{e:#}")))
  }

  #[napi]
  pub fn root(&self) -> napi::Result<Uint8Array> {
    Ok(self.node()?.digest().to_vec().into())
  }

  #[napi]
  pub fn root_hex(&self) -> napi::Result<String> {
    Ok(self.node()?.digest_hex())
  }

  #[napi]
  pub fn is_leaf(&self) -> napi::Result<bool> {
    Ok(self.node()?.is_leaf())
  }

  #[napi]
  pub fn left(&self) -> napi::Result<Option<HashTreeJs>> {
    self.child(Side::Left)
  }

  #[napi]
  pub fn right(&self) -> napi::Result<Option<HashTreeJs>> {
    self.child(Side::Right)
  }

  #[napi]
  pub fn leaf_count(&self) -> napi::Result<u32> {
    u32::try_from(self.node()?.leaf_count())
      .map_err(|_| napi::Error::from_reason("leaf count does not fit in u32"))
  }
}

impl HashTreeJs {
  fn node(&self) -> napi::Result<&TreeNode> {
    self
      .root
      .descend(&self.path)
      .ok_or_else(|| napi::Error::from_reason("tree handle points past a leaf"))
  }

  fn child(&self, side: Side) -> napi::Result<Option<HashTreeJs>> {
    let node = self.node()?;
    Ok(node.child(side).map(|_| {
      let mut path = self.path.clone();
      path.push(side);
      Self {
        root: Arc::clone(&self.root),
        path,
      }
    }))
  }
}

fn build(data: Vec<Vec<u8>>, options: HashTreeOptionsJs) -> anyhow::Result<TreeNode> {
  let options = TreeOptions::try_from(options).context("invalid HashTree options")?;
  let leaves: Vec<&[u8]> = data.iter().map(Vec::as_slice).collect();
  let tree = build_tree_with(Sha256Hasher::new, leaves, options)
    .with_context(|| format!("building hash tree over {} leaves", data.len()))?;
  Ok(tree)
}
