use crate::error::AppError;

/// Accepts an optional leading `+` followed by 7 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < 7 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!("Invalid phone number: {}", phone)));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation(format!("Invalid email address: {}", email)));
    }
    Ok(())
}

pub fn validate_positive_amount(field: &str, amount_cents: i64) -> Result<(), AppError> {
    if amount_cents <= 0 {
        return Err(AppError::Validation(format!("{} must be a positive amount", field)));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: i64) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::Validation(format!("{} cannot be negative", field)));
    }
    Ok(())
}

/// Billing months are "YYYY-MM" tokens.
pub fn validate_billing_month(month: &str) -> Result<(), AppError> {
    let valid = month.is_ascii()
        && month.len() == 7
        && month.as_bytes()[4] == b'-'
        && month[..4].chars().all(|c| c.is_ascii_digit())
        && month[5..].chars().all(|c| c.is_ascii_digit())
        && matches!(month[5..].parse::<u32>(), Ok(1..=12));
    if !valid {
        return Err(AppError::Validation(format!("Invalid billing month (expected YYYY-MM): {}", month)));
    }
    Ok(())
}
