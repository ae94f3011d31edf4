/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
///
/// Passwords are stored only as one-way hashes; the plaintext never
/// touches the database and the hash is never returned to callers.
///
/// # Example
///
/// ```no_run
/// use tatboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod password;
