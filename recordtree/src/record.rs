use std::fmt::Display;

use chrono::{DateTime, Utc};
use rand::RngCore;

use crate::{Digest, Hasher};

/// Length in bytes of the random salt attached to each record.
pub const SALT_LEN: usize = 5;

/// A record of the history, the leaf data of a hash tree.
///
/// Only its sequence id, value and header are digested: the creation time and the salt are
/// informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    sequence_id: u64,
    value: String,
    header: String,
    created_at: DateTime<Utc>,
    salt: [u8; SALT_LEN],
}

impl Record {
    /// Create a record, stamping it with the current time and a random salt.
    pub fn new(sequence_id: u64, value: impl Display, header: impl Into<String>) -> Self {
        let mut salt = [0; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);

        Self {
            sequence_id,
            value: value.to_string(),
            header: header.into(),
            created_at: Utc::now(),
            salt,
        }
    }

    /// Compute the leaf digest of this record: `H(sequence_id ":" value_len ":" value header)`.
    ///
    /// The value is prefixed with its length in bytes, so that no two distinct records share a
    /// canonical string, eg. `(1, "12")` and `(11, "2")`, or `"ab"|"c"` and `"a"|"bc"`.
    pub fn digest<H: Hasher>(&self) -> Digest {
        Digest::of::<H>(format!("{}:{}:{}{}", self.sequence_id, self.value.len(), self.value, self.header))
    }

    /// A copy of this record holding another value.
    pub fn with_value(&self, value: impl Display) -> Self {
        Self {
            value: value.to_string(),
            ..self.clone()
        }
    }

    /// A copy of this record holding another header.
    pub fn with_header(&self, header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..self.clone()
        }
    }

    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }

    /// The string form of the value the record was created with.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }
}
