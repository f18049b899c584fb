#![forbid(unsafe_code)]

use sha2::Digest as _;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

static TOKEN_NONCE: AtomicU64 = AtomicU64::new(0);

fn hex_digest(digest: impl AsRef<[u8]>) -> String {
    let digest = digest.as_ref();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}

/// Salted with the normalized email so equal passwords on different
/// accounts never share a digest.
pub(crate) fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(b"courselab-password-v1");
    hasher.update(email.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hex_digest(hasher.finalize())
}

pub(crate) fn mint_session_token(email: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut hasher = sha2::Sha256::new();
    hasher.update(b"courselab-session-v1");
    hasher.update(email.as_bytes());
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(TOKEN_NONCE.fetch_add(1, Ordering::Relaxed).to_le_bytes());
    hex_digest(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_is_salted_by_email() {
        let a = password_digest("a@example.com", "hunter22");
        let b = password_digest("b@example.com", "hunter22");
        assert_ne!(a, b);
        assert_eq!(a, password_digest("a@example.com", "hunter22"));
    }

    #[test]
    fn session_tokens_do_not_repeat() {
        let a = mint_session_token("a@example.com");
        let b = mint_session_token("a@example.com");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
