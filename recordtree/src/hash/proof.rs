use std::marker::PhantomData;

use super::{Digest, Hasher};

/// A single sibling digest in a hash proof.
///
/// It can be either `Sibling::Left(_)` or `Sibling::Right(_)` depending on its position in the recorded pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sibling<'p> {
    Left(&'p Digest),
    Right(&'p Digest),
}

impl Sibling<'_> {
    /// Compute the parent digest of this sibling and the given one depending on its position in the pair.
    fn combine<H: Hasher>(&self, other: &Digest) -> Digest {
        match self {
            Self::Left(digest) => Digest::combine::<H>(digest, other),
            Self::Right(digest) => Digest::combine::<H>(other, digest),
        }
    }
}

/// A hash proof.
///
/// It is built with all sibling digests required to compute the root digest for a given leaf digest,
/// so that it can be checked without access to the tree it comes from.
#[derive(Debug)]
pub struct HashProof<'p, H: Hasher> {
    root: &'p Digest,
    siblings: Vec<Sibling<'p>>,
    _hasher: PhantomData<H>,
}

impl<'p, H: Hasher> HashProof<'p, H> {
    /// Build a hash proof from the sibling digests met while climbing from a leaf to the root.
    pub(super) fn new(root: &'p Digest, siblings: Vec<Sibling<'p>>) -> Self {
        Self {
            root,
            siblings,
            _hasher: PhantomData,
        }
    }

    /// The root digest the proof commits to.
    pub fn root(&self) -> &'p Digest {
        self.root
    }

    /// The sibling digests, from the leaf up to the root.
    pub fn siblings(&self) -> &[Sibling<'p>] {
        &self.siblings
    }

    /// Number of steps from the leaf to the root.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

impl<H: Hasher> HashProof<'_, H> {
    /// Compute the hash proof wrt. the given leaf digest.
    pub fn compute(&self, leaf: Digest) -> Digest {
        self.siblings.iter().fold(leaf, |digest, sibling| sibling.combine::<H>(&digest))
    }

    /// Compute the hash proof wrt. the given leaf digest, comparing it to the expected root digest.
    pub fn verify(&self, leaf: Digest) -> bool {
        self.compute(leaf) == *self.root
    }
}
