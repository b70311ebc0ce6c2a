use validator::ValidateEmail;

use crate::error::ApiError;

/// Validate email format using the validator crate
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::Validation("Email cannot be empty".to_string()));
    }

    if !email.validate_email() {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(ApiError::Validation(
            "Password must be at most 128 characters long".to_string(),
        ));
    }

    // Check for at least one letter and one number
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_number = password.chars().any(|c| c.is_numeric());

    if !has_letter || !has_number {
        return Err(ApiError::Validation(
            "Password must contain at least one letter and one number".to_string(),
        ));
    }

    Ok(())
}

/// Validate a person name field (first/last name)
pub fn validate_name(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} cannot be empty")));
    }

    if value.len() > 100 {
        return Err(ApiError::Validation(format!(
            "{field} must be at most 100 characters long"
        )));
    }

    Ok(())
}

/// Validate a monetary amount: finite and non-negative
pub fn validate_amount(field: &str, value: f64) -> Result<(), ApiError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::Validation(format!(
            "{field} must be a non-negative amount"
        )));
    }

    Ok(())
}

/// Validate an exam score against its maximum
pub fn validate_score(score: f64, max_score: f64) -> Result<(), ApiError> {
    if !max_score.is_finite() || max_score <= 0.0 {
        return Err(ApiError::Validation(
            "max_score must be a positive number".to_string(),
        ));
    }

    if !score.is_finite() || score < 0.0 || score > max_score {
        return Err(ApiError::Validation(format!(
            "score must be between 0 and {max_score}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user.name@example.co.uk").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("noNumbers").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("first_name", "Asha").is_ok());
        assert!(validate_name("first_name", "").is_err());
        assert!(validate_name("first_name", "   ").is_err());
        assert!(validate_name("first_name", &"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("total_amount", 0.0).is_ok());
        assert!(validate_amount("total_amount", 1000.0).is_ok());
        assert!(validate_amount("total_amount", -1.0).is_err());
        assert!(validate_amount("total_amount", f64::NAN).is_err());
        assert!(validate_amount("total_amount", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(75.0, 100.0).is_ok());
        assert!(validate_score(0.0, 100.0).is_ok());
        assert!(validate_score(100.0, 100.0).is_ok());
        assert!(validate_score(101.0, 100.0).is_err());
        assert!(validate_score(-1.0, 100.0).is_err());
        assert!(validate_score(10.0, 0.0).is_err());
    }
}
