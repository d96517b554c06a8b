//! Argon2id password hashes in PHC string format.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Stored in place of a hash for accounts that cannot sign in with a password.
pub const UNUSABLE_PASSWORD_HASH: &str = "!";

#[derive(Clone, Default)]
pub struct Passwords {
    argon2: Argon2<'static>,
}

impl Passwords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheapest parameters argon2 accepts. Only for tests.
    #[cfg(test)]
    pub fn fast() -> Self {
        let params = argon2::Params::new(argon2::Params::MIN_M_COST, 1, 1, None)
            .expect("minimum argon2 parameters are valid");
        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }

    /// Hash `password` with a fresh random salt. CPU bound.
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// False for a wrong password and for anything that is not a PHC hash.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash).is_ok_and(|parsed| {
            self.argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}
