use bcrypt::{DEFAULT_COST, hash, verify};

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext() {
        let hashed = hash_password("motdepasse123").expect("hash");
        assert_ne!(hashed, "motdepasse123");
        assert!(verify_password("motdepasse123", &hashed).expect("verify"));
        assert!(!verify_password("autre", &hashed).expect("verify"));
    }
}
