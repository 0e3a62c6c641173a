//! Hashing de contraseñas con bcrypt

use bcrypt::{hash, verify};

use crate::utils::errors::AppError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))
}

/// Un hash corrupto cuenta como credencial inválida
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("secreto123", 4).unwrap();
        assert!(verify_password("secreto123", &hashed));
        assert!(!verify_password("otra", &hashed));
        assert!(!verify_password("secreto123", "no-es-un-hash"));
    }
}
