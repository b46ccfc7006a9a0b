use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{error, warn};

/// Passwords are cut to this many bytes before hashing and verifying.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Longest prefix of `plain` within [`MAX_PASSWORD_BYTES`] that ends on a
/// character boundary.
fn truncate(plain: &str) -> &str {
    if plain.len() <= MAX_PASSWORD_BYTES {
        return plain;
    }
    let mut end = MAX_PASSWORD_BYTES;
    while !plain.is_char_boundary(end) {
        end -= 1;
    }
    &plain[..end]
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(truncate(plain).as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Checks `plain` against a stored hash given either as text or raw bytes.
/// Anything that cannot be decoded is a mismatch, never an error.
pub fn verify_password(plain: &str, stored: impl AsRef<[u8]>) -> bool {
    let Ok(text) = std::str::from_utf8(stored.as_ref()) else {
        warn!("stored password hash is not utf-8");
        return false;
    };
    let text = text.trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
    let parsed = match PasswordHash::new(text) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "argon2 parse hash error");
            return false;
        }
    };
    Argon2::default()
        .verify_password(truncate(plain).as_bytes(), &parsed)
        .is_ok()
}
