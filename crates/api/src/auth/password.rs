//! Password storage for user accounts.
//!
//! Only the Argon2id PHC string reaches the `users.password_hash` column;
//! it carries its own salt and parameters, so verification needs nothing else.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    fn verifies(password: &str, hash: &str) -> bool {
        let parsed_hash = PasswordHash::new(hash).unwrap();
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("perro-callejero").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verifies("perro-callejero", &hash));
        assert!(!verifies("gato-callejero", &hash));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("perro-callejero").unwrap();
        let b = hash_password("perro-callejero").unwrap();
        assert_ne!(a, b);
    }
}
