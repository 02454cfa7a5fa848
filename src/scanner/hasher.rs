//! BLAKE3 content fingerprints.
//!
//! # Overview
//! A [`Fingerprint`] is the BLAKE3 digest of a file's complete content,
//! computed in one shot over the whole buffer. Every file gets a fresh
//! digest; no hasher state is carried from one file to the next.

use std::fmt;

/// Length of a fingerprint in bytes.
pub const FINGERPRINT_LEN: usize = blake3::OUT_LEN;

/// Fixed-length content digest. Equal fingerprints mean equal content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Digest the entire content buffer.
    #[must_use]
    pub fn of(content: &[u8]) -> Self {
        Self(*blake3::hash(content).as_bytes())
    }

    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Lowercase hex rendering (64 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps log lines readable
        write!(f, "Fingerprint({}..)", &self.to_hex()[..12])
    }
}
