use crate::{
    error::{AppError, Result},
    models::VerifiedUser,
};

/// Rejects requests that address another user's resources.
pub fn ensure_same_user(user: &VerifiedUser, email: &str) -> Result<()> {
    if user.email.eq_ignore_ascii_case(email.trim()) {
        Ok(())
    } else {
        Err(AppError::Forbidden("forbidden access".to_string()))
    }
}
