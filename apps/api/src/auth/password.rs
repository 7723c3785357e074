use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Burns one verification against a throwaway hash. Login calls this for
/// unknown emails so both failure paths do the same amount of work.
pub fn verify_against_dummy(plain: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| hash_password("jobmatch-dummy-password").ok());
    if let Some(hash) = dummy {
        let _ = verify_password(plain, hash);
    }
}

/// `hash_password` on the blocking pool.
pub async fn spawn_hash(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain)).await?
}

/// `verify_password` on the blocking pool.
pub async fn spawn_verify(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await?
}

/// `verify_against_dummy` on the blocking pool.
pub async fn spawn_dummy_verify(plain: String) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || verify_against_dummy(&plain)).await?;
    Ok(())
}
