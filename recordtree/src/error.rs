use crate::Digest;

/// An enum to deal with errors.
///
/// None of them is fatal: a tree stays safe to query after any of them got reported.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The digest is not part of the tree index, eg. the record was never appended.
    #[error("digest {0} not found in tree")]
    NotFound(Digest),

    /// The recorded children of this digest do not recombine into it, or the climb toward the root is broken.
    #[error("tree index is inconsistent at digest {digest}")]
    Inconsistent { digest: Digest },

    /// The given string is not a hexadecimal digest.
    #[error("invalid hexadecimal digest: {0:?}")]
    InvalidDigest(String),
}
