use std::collections::HashMap;

use super::{Digest, Hasher};

/// The children of an indexed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Children<'t> {
    Leaf,
    Branch(&'t Digest, &'t Digest),
}

/// The parent of an indexed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent<'t> {
    Root,
    Node(&'t Digest),
}

/// Parent/child links between the digests of a hash tree.
///
/// It is only ever filled while building a tree, and replaced wholesale by the next build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct Index {
    pub(super) children: HashMap<Digest, Option<(Digest, Digest)>>,
    pub(super) parents: HashMap<Digest, Option<Digest>>,
}

impl Index {
    /// Register a leaf digest, which has no children.
    pub fn leaf(&mut self, leaf: &Digest) {
        self.children.entry(leaf.clone()).or_insert(None);
    }

    /// Combine two digests, registering the result as their parent.
    pub fn link<H: Hasher>(&mut self, first: &Digest, second: &Digest) -> Digest {
        let parent = Digest::combine::<H>(first, second);

        self.parents.insert(first.clone(), Some(parent.clone()));
        self.parents.insert(second.clone(), Some(parent.clone()));
        self.children.insert(parent.clone(), Some((first.clone(), second.clone())));

        parent
    }

    /// Mark the given digest as the top node.
    pub fn root(&mut self, root: &Digest) {
        self.parents.insert(root.clone(), None);
    }

    pub fn children_of(&self, digest: &str) -> Option<Children<'_>> {
        self.children.get(digest).map(|children| match children {
            Some((first, second)) => Children::Branch(first, second),
            None => Children::Leaf,
        })
    }

    pub fn parent_of(&self, digest: &str) -> Option<Parent<'_>> {
        self.parent_entry(digest).map(|(_, parent)| parent)
    }

    /// Same as [`Index::parent_of`], also borrowing the indexed digest itself.
    pub fn parent_entry(&self, digest: &str) -> Option<(&Digest, Parent<'_>)> {
        self.parents.get_key_value(digest).map(|(key, parent)| match parent {
            Some(parent) => (key, Parent::Node(parent)),
            None => (key, Parent::Root),
        })
    }

    /// Same as [`Index::children_of`], also borrowing the indexed digest itself.
    pub fn children_entry(&self, digest: &str) -> Option<(&Digest, Children<'_>)> {
        self.children.get_key_value(digest).map(|(key, children)| match children {
            Some((first, second)) => (key, Children::Branch(first, second)),
            None => (key, Children::Leaf),
        })
    }

    /// The left child of a branch, ie. the first one of its recorded pair.
    pub fn left_of(&self, digest: &str) -> Option<&Digest> {
        match self.children_of(digest)? {
            Children::Branch(left, _) => Some(left),
            Children::Leaf => None,
        }
    }

    /// The right child of a branch, ie. the second one of its recorded pair.
    pub fn right_of(&self, digest: &str) -> Option<&Digest> {
        match self.children_of(digest)? {
            Children::Branch(_, right) => Some(right),
            Children::Leaf => None,
        }
    }
}
