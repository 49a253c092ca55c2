use std::fmt;

/// Which child to follow when walking down from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A node of a binary hash tree.
///
/// Children are owned and always come in pairs, so a node is either a leaf or
/// has exactly two children.
#[derive(Clone, PartialEq, Eq)]
pub struct TreeNode {
    digest: Vec<u8>,
    children: Option<Box<(TreeNode, TreeNode)>>,
}

impl TreeNode {
    pub(crate) fn leaf(digest: Vec<u8>) -> Self {
        Self {
            digest,
            children: None,
        }
    }

    pub(crate) fn internal(digest: Vec<u8>, left: TreeNode, right: TreeNode) -> Self {
        Self {
            digest,
            children: Some(Box::new((left, right))),
        }
    }

    /// The raw digest identifying this node.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Lowercase hex rendering of [`digest`](Self::digest), no prefix.
    pub fn digest_hex(&self) -> String {
        hex::encode(&self.digest)
    }

    /// Left child. `None` for leaves.
    pub fn left(&self) -> Option<&TreeNode> {
        self.children.as_deref().map(|(left, _)| left)
    }

    /// Right child. `None` for leaves.
    pub fn right(&self) -> Option<&TreeNode> {
        self.children.as_deref().map(|(_, right)| right)
    }

    pub fn child(&self, side: Side) -> Option<&TreeNode> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// Follow `path` from this node. `None` if the path runs past a leaf.
    pub fn descend(&self, path: &[Side]) -> Option<&TreeNode> {
        path.iter().try_fold(self, |node, &side| node.child(side))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Leaf nodes from left to right.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node.children.as_deref() {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => out.push(node),
            }
        }
        out
    }

    pub fn leaf_count(&self) -> usize {
        match self.children.as_deref() {
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
            None => 1,
        }
    }

    /// Number of edges on the longest root-to-leaf path. A lone leaf has height 0.
    pub fn height(&self) -> usize {
        match self.children.as_deref() {
            Some((left, right)) => 1 + left.height().max(right.height()),
            None => 0,
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digest_hex())
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TreeNode");
        s.field("digest", &self.digest_hex());
        if let Some((left, right)) = self.children.as_deref() {
            s.field("left", left).field("right", right);
        }
        s.finish()
    }
}
