use std::{borrow::Borrow, fmt, str::FromStr};

use super::Hasher;
use crate::Error;

/// A digest value, as the hexadecimal representation of a hash.
///
/// Digests are compared by exact string equality, which is also how the tree indexes them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest(String);

impl Digest {
    /// Hash the given bytes.
    pub fn of<H: Hasher>(bytes: impl AsRef<[u8]>) -> Self {
        let mut hasher = H::default();
        hasher.write(bytes.as_ref());

        Self(H::encode(&hasher.finish()))
    }

    /// Hash the concatenation of two digests, in the given order.
    pub fn combine<H: Hasher>(first: &Self, second: &Self) -> Self {
        Self(H::encode(&H::hash(first, second)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = Error;

    /// Parse a hexadecimal digest, eg. a root published by a tree.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match hex::decode(s) {
            Ok(bytes) if !bytes.is_empty() => Ok(Self(s.to_ascii_lowercase())),
            _ => Err(Error::InvalidDigest(s.to_owned())),
        }
    }
}

// Digests are hashed as strings, not as the bytes they encode.
impl AsRef<[u8]> for Digest {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl AsRef<str> for Digest {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Digest {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}
