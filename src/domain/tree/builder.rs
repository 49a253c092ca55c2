use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use super::node::TreeNode;
use crate::domain::{hash::HashFunction, leaf::Leaf, options::TreeOptions};
use crate::error::{BuildError, Result};

/// Build the hash tree over `leaves` with a single, reused hash function.
///
/// The hasher is reset before every digest, so whatever it held before the
/// call does not affect the result.
pub fn build_tree<H, I>(hasher: &mut H, leaves: I) -> Result<TreeNode>
where
    H: HashFunction + ?Sized,
    I: IntoIterator,
    I::Item: Leaf,
{
    let total_start = Instant::now();

    let leaf_start = Instant::now();
    let nodes = leaves
        .into_iter()
        .enumerate()
        .map(|(index, leaf)| leaf_digest(hasher, index, leaf).map(TreeNode::leaf))
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "Hashing {} leaves took {:?}",
        nodes.len(),
        leaf_start.elapsed()
    );

    let leaf_count = nodes.len();
    let root = reduce(nodes, |level| reduce_level(hasher, level))?;
    info!(
        "Built tree over {} leaves in {:?}",
        leaf_count,
        total_start.elapsed()
    );
    Ok(root)
}

/// Build the hash tree with the parallelism chosen in `options`.
///
/// `new_hasher` hands out independent hash function instances: one per rayon
/// worker when parallel, a single one otherwise. The tree is identical to the
/// one [`build_tree`] produces for the same leaves.
pub fn build_tree_with<F, H, L>(
    new_hasher: F,
    leaves: Vec<L>,
    options: TreeOptions,
) -> Result<TreeNode>
where
    F: Fn() -> H + Sync + Send,
    H: HashFunction,
    L: Leaf + Send,
{
    let parallelism = options.parallelism;
    if !parallelism.parallel_leaves() {
        let mut hasher = new_hasher();
        return build_tree(&mut hasher, leaves);
    }

    let total_start = Instant::now();
    let leaf_count = leaves.len();
    if leaf_count == 0 {
        warn!("Refusing to build a tree without leaves");
        return Err(BuildError::EmptyInput);
    }

    let leaf_start = Instant::now();
    // lowest leaf index that failed so far; leaves above it are skipped
    let first_failure = AtomicUsize::new(usize::MAX);
    let digests: Vec<Option<Result<Vec<u8>>>> = leaves
        .into_par_iter()
        .enumerate()
        .map_init(&new_hasher, |hasher, (index, leaf)| {
            if index > first_failure.load(Ordering::Relaxed) {
                return None;
            }
            let digest = leaf_digest(hasher, index, leaf);
            if digest.is_err() {
                first_failure.fetch_min(index, Ordering::Relaxed);
            }
            Some(digest)
        })
        .collect();
    // a skipped leaf always sits after a failed one, so the first error in
    // index order is reached before any gap
    let nodes = digests
        .into_iter()
        .flatten()
        .map(|digest| digest.map(TreeNode::leaf))
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "Hashing {} leaves in parallel took {:?}",
        leaf_count,
        leaf_start.elapsed()
    );

    let root = if parallelism.parallel_levels() {
        reduce(nodes, |level| reduce_level_parallel(&new_hasher, level))?
    } else {
        let mut hasher = new_hasher();
        reduce(nodes, |level| reduce_level(&mut hasher, level))?
    };
    info!(
        "Built tree over {} leaves ({}) in {:?}",
        leaf_count,
        parallelism,
        total_start.elapsed()
    );
    Ok(root)
}

/// Collapse levels until a single root remains.
fn reduce<F>(mut level: Vec<TreeNode>, mut next_level: F) -> Result<TreeNode>
where
    F: FnMut(Vec<TreeNode>) -> Result<Vec<TreeNode>>,
{
    if level.is_empty() {
        warn!("Refusing to build a tree without leaves");
        return Err(BuildError::EmptyInput);
    }

    let mut depth = 0;
    while level.len() > 1 {
        let level_start = Instant::now();
        let width = level.len();
        level = next_level(level)?;
        depth += 1;
        debug!(
            "Level {} reduced {} nodes to {} in {:?}",
            depth,
            width,
            level.len(),
            level_start.elapsed()
        );
    }
    level.pop().ok_or(BuildError::EmptyInput)
}

/// Pair up `(n0, n1), (n2, n3), ...`; an odd last node moves up untouched.
fn reduce_level<H>(hasher: &mut H, level: Vec<TreeNode>) -> Result<Vec<TreeNode>>
where
    H: HashFunction + ?Sized,
{
    let mut next = Vec::with_capacity(level.len() / 2 + 1);
    let mut pairs = level.into_iter().tuples::<(_, _)>();
    for (left, right) in &mut pairs {
        let digest = node_digest(hasher, left.digest(), right.digest())?;
        next.push(TreeNode::internal(digest, left, right));
    }
    next.extend(pairs.into_buffer());
    Ok(next)
}

fn reduce_level_parallel<F, H>(new_hasher: &F, mut level: Vec<TreeNode>) -> Result<Vec<TreeNode>>
where
    F: Fn() -> H + Sync + Send,
    H: HashFunction,
{
    let carry = if level.len() % 2 == 1 { level.pop() } else { None };
    let pairs: Vec<(TreeNode, TreeNode)> = level.into_iter().tuples().collect();

    let mut next = pairs
        .into_par_iter()
        .map_init(new_hasher, |hasher, (left, right)| -> Result<TreeNode> {
            let digest = node_digest(hasher, left.digest(), right.digest())?;
            Ok(TreeNode::internal(digest, left, right))
        })
        .collect::<Result<Vec<_>>>()?;
    next.extend(carry);
    Ok(next)
}

fn leaf_digest<H, L>(hasher: &mut H, index: usize, mut leaf: L) -> Result<Vec<u8>>
where
    H: HashFunction + ?Sized,
    L: Leaf,
{
    hasher.reset();

    let mut sink = HashSink {
        hasher: &mut *hasher,
        short_write: None,
    };
    let written = leaf.write_leaf(&mut sink);
    // checked whatever the leaf returned: a leaf may swallow the write error
    if let Some((expected, actual)) = sink.short_write {
        warn!("Leaf {index}: hash function consumed {actual} of {expected} bytes");
        return Err(BuildError::IncompleteWrite { expected, actual });
    }
    if let Err(source) = written {
        warn!("Leaf {index} could not be converted to bytes: {source}");
        return Err(BuildError::LeafEncodingFailed { index, source });
    }

    Ok(hasher.finalize())
}

fn node_digest<H>(hasher: &mut H, left: &[u8], right: &[u8]) -> Result<Vec<u8>>
where
    H: HashFunction + ?Sized,
{
    hasher.reset();
    write_exact(hasher, left)?;
    write_exact(hasher, right)?;
    Ok(hasher.finalize())
}

fn write_exact<H>(hasher: &mut H, bytes: &[u8]) -> Result<()>
where
    H: HashFunction + ?Sized,
{
    let actual = hasher.write(bytes);
    if actual != bytes.len() {
        warn!("Hash function consumed {} of {} bytes", actual, bytes.len());
        return Err(BuildError::IncompleteWrite {
            expected: bytes.len(),
            actual,
        });
    }
    Ok(())
}

/// `io::Write` view of a hash function that refuses partial writes.
struct HashSink<'a, H: ?Sized> {
    hasher: &'a mut H,
    short_write: Option<(usize, usize)>,
}

impl<H: HashFunction + ?Sized> Write for HashSink<'_, H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.hasher.write(buf);
        if written != buf.len() {
            if self.short_write.is_none() {
                self.short_write = Some((buf.len(), written));
            }
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "hash function did not consume all bytes",
            ));
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
