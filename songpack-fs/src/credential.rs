//! HTTP Basic credential check
//!
//! The configured `user:pass` secret is turned into the exact `Authorization`
//! header value a client must send. Incoming values are compared through
//! SHA-256 digests with an XOR fold so timing does not depend on where (or
//! whether) the strings differ, nor on the provided length.

use std::fmt;

use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Expected `Authorization` header for one shared secret
#[derive(Clone)]
pub struct Credential {
    expected: String,
}

impl Credential {
    /// Build from a `user:pass` secret
    pub fn new(secret: &str) -> Result<Self> {
        let Some((user, _password)) = secret.split_once(':') else {
            return Err(Error::InvalidCredential(
                "expected the form user:pass".to_string(),
            ));
        };

        if user.is_empty() {
            return Err(Error::InvalidCredential("user part is empty".to_string()));
        }

        Ok(Self::encode(secret))
    }

    /// Build without validating the `user:pass` shape
    pub(crate) fn encode(secret: &str) -> Self {
        Self {
            expected: format!("Basic {}", general_purpose::STANDARD.encode(secret)),
        }
    }

    /// Header value clients must send, e.g. `Basic YWRtaW46cGFzc3dvcmQ=`
    pub fn header_value(&self) -> &str {
        &self.expected
    }

    /// Compare a received `Authorization` value in constant time
    pub fn matches(&self, provided: &[u8]) -> bool {
        let expected = Sha256::digest(self.expected.as_bytes());
        let provided = Sha256::digest(provided);
        constant_time_eq(&expected, &provided)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
