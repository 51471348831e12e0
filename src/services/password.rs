use crate::errors::ApiError;

/// bcrypt at its default cost; every hash carries its own salt.
pub fn hash(password: &str) -> Result<String, ApiError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

pub fn verify(password: &str, hash: &str) -> Result<bool, ApiError> {
    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hashed = hash("hunter2-but-longer").unwrap();
        assert_ne!(hashed, "hunter2-but-longer");
        assert!(verify("hunter2-but-longer", &hashed).unwrap());
        assert!(!verify("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let a = hash("hunter2-but-longer").unwrap();
        let b = hash("hunter2-but-longer").unwrap();
        assert_ne!(a, b);
    }
}
