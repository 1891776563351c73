use std::fmt::{Debug, Display};

use log::{debug, trace, warn};

use crate::{Error, Record};

mod digest;
mod fold;
mod index;
mod proof;

pub use digest::Digest;
pub use index::{Children, Parent};
pub use proof::{HashProof, Sibling};

use index::Index;

/// A hasher trait to produce hash values.
pub trait Hasher: Default {
    type Hash: AsRef<[u8]> + Debug;

    fn write(&mut self, bytes: &[u8]);
    fn finish(self) -> Self::Hash;

    fn hash(first: impl AsRef<[u8]>, second: impl AsRef<[u8]>) -> Self::Hash
    where
        Self: Sized,
    {
        let mut hasher = Self::default();
        hasher.write(first.as_ref());
        hasher.write(second.as_ref());
        hasher.finish()
    }

    /// Represent a hash value as a digest string, lowercase hexadecimal by default.
    fn encode(hash: &Self::Hash) -> String {
        hex::encode(hash)
    }
}

/// A hash tree over an append-only history of records.
///
/// The tree is rebuilt from scratch on every append: its root and its index always reflect the
/// whole history, and rebuilding from the same history always yields the same tree.
#[derive(Debug)]
pub struct HashTree<H: Hasher> {
    history: Vec<Record>,
    root: Option<Digest>,
    index: Index,
    passes: u32,
    _hasher: std::marker::PhantomData<H>,
}

impl<H: Hasher> HashTree<H> {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            root: None,
            index: Index::default(),
            passes: fold::passes(0),
            _hasher: std::marker::PhantomData,
        }
    }

    /// Append a record holding the given value and an empty header, then rebuild the tree.
    pub fn append(&mut self, value: impl Display) -> &Record {
        self.append_with_header(value, "")
    }

    /// Append a record holding the given value and header, then rebuild the tree.
    pub fn append_with_header(&mut self, value: impl Display, header: impl Into<String>) -> &Record {
        let index = self.history.len();

        self.history.push(Record::new(index as u64, value, header));
        self.rebuild();

        &self.history[index]
    }

    /// The root digest, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Digest> {
        self.root.as_ref()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The records of the tree, ordered by sequence id.
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    pub fn get(&self, sequence_id: u64) -> Option<&Record> {
        usize::try_from(sequence_id).ok().and_then(|index| self.history.get(index))
    }

    /// Number of folding passes applied by the latest build.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn children_of(&self, digest: &Digest) -> Option<Children<'_>> {
        self.index.children_of(digest.as_str())
    }

    pub fn parent_of(&self, digest: &Digest) -> Option<Parent<'_>> {
        self.index.parent_of(digest.as_str())
    }

    /// Recompute the root and the index from the whole history, discarding the previous ones.
    fn rebuild(&mut self) {
        let mut index = Index::default();
        let leaves: Vec<_> = self.history.iter().map(Record::digest::<H>).collect();
        let passes = fold::passes(leaves.len());

        let mut layer = fold::leaves::<H>(&mut index, &leaves);
        for pass in 0..passes {
            layer = fold::fold::<H>(&mut index, &layer, pass);
            trace!("folding pass {pass} left {} digest(s)", layer.len());
        }

        debug_assert!(layer.len() <= 1);
        let root = layer.pop();
        if let Some(root) = &root {
            index.root(root);
        }

        debug!(
            "rebuilt tree over {} record(s) in {passes} pass(es), root: {}",
            leaves.len(),
            root.as_ref().map_or("<empty>", Digest::as_str)
        );

        self.root = root;
        self.index = index;
        self.passes = passes;
    }

    /// Check that a record is part of the tree, climbing from its digest up to the root.
    ///
    /// Each step recombines the recorded children of the parent, so that a tampered index gets
    /// reported as [`Error::Inconsistent`].
    pub fn verify(&self, record: &Record) -> Result<(), Error> {
        let leaf = record.digest::<H>();
        let Some(mut parent) = self.index.parent_of(leaf.as_str()) else {
            debug!("record #{} is not part of the tree", record.sequence_id());
            return Err(Error::NotFound(leaf));
        };
        let mut digest = &leaf;

        // climbing one layer per step, the root is always reached within this bound
        for _ in 0..=self.passes {
            let node = match parent {
                Parent::Root => return Ok(()),
                Parent::Node(node) => node,
            };

            match self.index.children_of(node.as_str()) {
                Some(Children::Branch(first, second))
                    if (first == digest || second == digest) && Digest::combine::<H>(first, second) == *node => {}
                _ => return Err(inconsistent(node)),
            }

            parent = self.index.parent_of(node.as_str()).ok_or_else(|| inconsistent(node))?;
            digest = node;
        }

        Err(inconsistent(digest))
    }

    /// Whether a record is part of the tree, see [`HashTree::verify`].
    pub fn is_included(&self, record: &Record) -> bool {
        self.verify(record).is_ok()
    }

    /// Build the hash proof of a record, or `None` when it is not part of the tree.
    pub fn proof(&self, record: &Record) -> Option<HashProof<'_, H>> {
        let (mut digest, mut parent) = self.index.parent_entry(record.digest::<H>().as_str())?;
        let mut siblings = Vec::new();

        for _ in 0..=self.passes {
            let node = match parent {
                Parent::Root => return Some(HashProof::new(digest, siblings)),
                Parent::Node(node) => node,
            };

            match self.index.children_of(node.as_str())? {
                Children::Branch(first, second) if first == digest => siblings.push(Sibling::Right(second)),
                Children::Branch(first, second) if second == digest => siblings.push(Sibling::Left(first)),
                _ => return None,
            }

            (digest, parent) = self.index.parent_entry(node.as_str())?;
        }

        None
    }

    /// Visit the whole tree from its root, see [`HashTree::walk_down_from`].
    pub fn walk_down(&self) -> impl Iterator<Item = (&Digest, usize)> {
        self.root.iter().flat_map(move |root| self.descend(root))
    }

    /// Visit the subtree under the given digest, right child first, then the node itself, then the
    /// left child, along with the depth of each digest relative to the given one.
    pub fn walk_down_from(&self, digest: &Digest) -> Result<impl Iterator<Item = (&Digest, usize)>, Error> {
        match self.index.children_entry(digest.as_str()) {
            Some((digest, _)) => Ok(self.descend(digest)),
            None => Err(Error::NotFound(digest.clone())),
        }
    }

    fn descend<'t>(&'t self, from: &'t Digest) -> impl Iterator<Item = (&'t Digest, usize)> {
        let mut pending = Vec::new();
        let mut next = Some((from, 0));

        std::iter::from_fn(move || {
            while let Some((digest, depth)) = next.take() {
                next = self.index.right_of(digest.as_str()).map(|right| (right, depth + 1));
                pending.push((digest, depth));
            }

            let (digest, depth) = pending.pop()?;
            next = self.index.left_of(digest.as_str()).map(|left| (left, depth + 1));

            Some((digest, depth))
        })
    }

    /// Follow the parents of the given digest up to the root, along with the number of steps
    /// taken to reach each of them.
    ///
    /// This only checks that the digest is reachable, see [`HashTree::verify`] for the actual
    /// verification of a record.
    pub fn walk_up(&self, digest: &Digest) -> Result<Vec<(&Digest, usize)>, Error> {
        let (mut digest, mut parent) = self
            .index
            .parent_entry(digest.as_str())
            .ok_or_else(|| Error::NotFound(digest.clone()))?;
        let mut path = vec![(digest, 0)];

        for depth in 1..=self.passes as usize + 1 {
            let Parent::Node(node) = parent else {
                return Ok(path);
            };

            (digest, parent) = self.index.parent_entry(node.as_str()).ok_or_else(|| inconsistent(node))?;
            path.push((digest, depth));
        }

        Err(inconsistent(digest))
    }
}

impl<H: Hasher> Default for HashTree<H> {
    fn default() -> Self {
        Self::new()
    }
}

fn inconsistent(digest: &Digest) -> Error {
    warn!("inconsistent tree index at digest {digest}");

    Error::Inconsistent { digest: digest.clone() }
}

impl<H: Hasher, T: Display> Extend<T> for HashTree<H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.append(value);
        }
    }
}

impl<H: Hasher, T: Display> FromIterator<T> for HashTree<H> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tree = HashTree::new();
        tree.extend(values);
        tree
    }
}
