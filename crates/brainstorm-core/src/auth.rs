//! Shared-password gate.
//!
//! An empty or absent password disables the gate. Otherwise a caller must
//! supply exactly the configured password. Only the SHA-256 digest of the
//! password is kept in memory.

use std::fmt;

use sha2::{Digest, Sha256};

/// Checks supplied passwords against the configured one.
#[derive(Clone, Default)]
pub struct PasswordGate {
    digest: Option<[u8; 32]>,
}

impl PasswordGate {
    pub fn new(password: Option<&str>) -> Self {
        let digest = password.filter(|p| !p.is_empty()).map(hash_password);
        Self { digest }
    }

    /// A gate that lets everyone through.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn is_required(&self) -> bool {
        self.digest.is_some()
    }

    pub fn check(&self, supplied: Option<&str>) -> bool {
        match (&self.digest, supplied) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(expected), Some(supplied)) => digests_equal(expected, &hash_password(supplied)),
        }
    }
}

impl fmt::Debug for PasswordGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordGate")
            .field("required", &self.is_required())
            .finish()
    }
}

fn hash_password(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

// Fixed-length comparison without early exit.
fn digests_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_password_always_passes() {
        for gate in [PasswordGate::new(None), PasswordGate::new(Some("")), PasswordGate::open()] {
            assert!(!gate.is_required());
            assert!(gate.check(None));
            assert!(gate.check(Some("anything")));
        }
    }

    #[test]
    fn test_exact_match_required() {
        let gate = PasswordGate::new(Some("s3cret"));
        assert!(gate.is_required());
        assert!(gate.check(Some("s3cret")));
        assert!(!gate.check(Some("S3cret")));
        assert!(!gate.check(Some("s3cret ")));
        assert!(!gate.check(Some("")));
        assert!(!gate.check(None));
    }

    #[test]
    fn test_debug_hides_password() {
        let gate = PasswordGate::new(Some("s3cret"));
        let shown = format!("{gate:?}");
        assert_eq!(shown, "PasswordGate { required: true }");
    }
}
