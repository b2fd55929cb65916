//! Credentials module
//!
//! Derived password credentials and the verifier that checks a claimed
//! password against the active account row.

mod verifier;

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub use verifier::CredentialVerifier;

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

/// Opaque derived credential as stored in the `password` column.
///
/// Format: `sha256$<salt hex>$<digest hex>`. The raw secret is never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential(String);

impl StoredCredential {
    /// Wrap a value read back from the store
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Split into salt and digest bytes; `None` for any unknown format
    fn parts(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        let mut fields = self.0.splitn(3, '$');
        if fields.next()? != SCHEME {
            return None;
        }
        let salt = hex::decode(fields.next()?).ok()?;
        let digest = hex::decode(fields.next()?).ok()?;
        Some((salt, digest))
    }
}

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StoredCredential([REDACTED])")
    }
}

/// Derive a fresh credential for `password` with a random salt
pub fn derive_credential(password: &str) -> StoredCredential {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    derive_with_salt(password, &salt)
}

fn derive_with_salt(password: &str, salt: &[u8]) -> StoredCredential {
    StoredCredential(format!(
        "{}${}${}",
        SCHEME,
        hex::encode(salt),
        hex::encode(digest(salt, password))
    ))
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Check `password` against a stored credential in constant time.
///
/// Malformed stored values never match.
pub fn credential_matches(password: &str, stored: &StoredCredential) -> bool {
    let Some((salt, expected)) = stored.parts() else {
        return false;
    };
    let actual = digest(&salt, password);
    actual.as_slice().ct_eq(expected.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_credential_matches_its_password() {
        let credential = derive_credential("secretpw");
        assert!(credential_matches("secretpw", &credential));
        assert!(!credential_matches("secretpx", &credential));
        assert!(!credential_matches("", &credential));
    }

    #[test]
    fn test_credential_never_contains_secret() {
        let credential = derive_credential("secretpw");
        assert!(!credential.as_str().contains("secretpw"));
        assert!(credential.as_str().starts_with("sha256$"));
    }

    #[test]
    fn test_salts_differ_between_derivations() {
        let a = derive_credential("secretpw");
        let b = derive_credential("secretpw");
        assert_ne!(a, b);
        assert!(credential_matches("secretpw", &a));
        assert!(credential_matches("secretpw", &b));
    }

    #[test]
    fn test_fixed_salt_is_deterministic() {
        let a = derive_with_salt("secretpw", b"0123456789abcdef");
        let b = derive_with_salt("secretpw", b"0123456789abcdef");
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_credentials_never_match() {
        for raw in ["secretpw", "", "sha256$zz$00", "md5$00$00", "sha256$00"] {
            assert!(!credential_matches("secretpw", &StoredCredential::from_stored(raw)));
        }
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = derive_credential("secretpw");
        assert_eq!(format!("{:?}", credential), "StoredCredential([REDACTED])");
    }
}
