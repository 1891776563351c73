//! A hash tree (aka. Merkle tree) committing to an append-only history of records.
//!
//! Every append rebuilds the whole tree from the history, folding the record digests layer by
//! layer with an alternating pairing rule: the leaf layer and odd passes pair digests from the
//! left, even passes pair them from the right. The resulting root commits to the ordered history,
//! and the parent/child index built alongside it allows checking that a record is part of it.
//!
//! # Pros of the current implementation
//! - No need for smart pointers to link parents and children together, digests are plain values
//!   indexing each other.
//! - The only way to alter a hash tree is to have a mutable access onto it.
//!
//! # Known limitations of the current implementation
//! - Not suitable for straight concurrent access, callers have to serialize writers themselves.
//! - Each append costs a full rebuild, so building a tree of `n` records is quadratic.

mod error;
mod hash;
mod record;

pub use error::Error;
pub use hash::{Children, Digest, HashProof, HashTree, Hasher, Parent, Sibling};
pub use record::{Record, SALT_LEN};

#[cfg(feature = "digest_compat")]
pub mod compat;

#[cfg(feature = "digest_compat")]
pub use compat::Sha512Tree;
