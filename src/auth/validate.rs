use crate::models::identity::DEPARTMENTS;

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Invalid email".to_string());
    }
    None
}

/// Validate a phone number: optional leading '+', then 7-15 digits,
/// dashes, or spaces.
pub fn validate_phone(phone: &str) -> Option<String> {
    let trimmed = phone.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let valid_chars = digits
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == ' ');
    if !valid_chars || digits.len() < 7 || digits.len() > 15 {
        return Some("Invalid phone".to_string());
    }
    None
}

/// Validate a password: min 8 chars on create.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.len() < 8 {
        return Some("Password must be at least 8 characters".to_string());
    }
    None
}

/// Validate an identity department against the enumerated set.
pub fn validate_department(department: &str) -> Option<String> {
    if DEPARTMENTS.contains(&department) {
        None
    } else {
        Some(format!("Unknown department: {department}"))
    }
}
