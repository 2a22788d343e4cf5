use anyhow::{Context, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

// Same Argon2id parameters the web application uses for account passwords
// (64 MiB memory, 3 iterations, 1 lane). Hashes written by this tool must
// verify against the application's login path.
fn argon2_hasher() -> Argon2<'static> {
    let params = argon2::Params::new(65_536, 3, 1, None).expect("Invalid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Hash a plaintext password into a PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = argon2_hasher()
        .hash_password(password.as_bytes(), &salt)
        .context("Failed to hash password")?;
    Ok(phc.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).context("Invalid password hash format")?;
    Ok(argon2_hasher()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
