//! Field validators for the write paths.
//!
//! Each check surfaces the first violated rule as a
//! [`DomainError::Validation`], so a response carries one message at a time.

use std::sync::LazyLock;

use rust_decimal::Decimal;

use crate::domain::error::{DomainError, DomainResult};

static PHONE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^\+?[0-9]{10,15}$").expect("static regex should not panic")
});

static EMAIL_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex should not panic")
});

pub fn name(value: &str) -> DomainResult<()> {
    let len = value.chars().count();
    if len < 2 {
        return Err(DomainError::validation("Name must be at least 2 characters"));
    }
    if len > 100 {
        return Err(DomainError::validation("Name must be at most 100 characters"));
    }
    Ok(())
}

pub fn phone(value: &str) -> DomainResult<()> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(DomainError::validation("Invalid phone number"))
    }
}

pub fn email(value: &str) -> DomainResult<()> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(DomainError::validation("Invalid email"))
    }
}

pub fn address(value: &str) -> DomainResult<()> {
    let len = value.chars().count();
    if len < 5 {
        return Err(DomainError::validation(
            "Address must be at least 5 characters",
        ));
    }
    if len > 500 {
        return Err(DomainError::validation(
            "Address must be at most 500 characters",
        ));
    }
    Ok(())
}

pub fn service_type(value: &str) -> DomainResult<()> {
    let len = value.chars().count();
    if len < 2 {
        return Err(DomainError::validation("Service type required"));
    }
    if len > 100 {
        return Err(DomainError::validation(
            "Service type must be at most 100 characters",
        ));
    }
    Ok(())
}

pub fn description(value: &str) -> DomainResult<()> {
    let len = value.chars().count();
    if len < 10 {
        return Err(DomainError::validation(
            "Description must be at least 10 characters",
        ));
    }
    if len > 1000 {
        return Err(DomainError::validation(
            "Description must be at most 1000 characters",
        ));
    }
    Ok(())
}

pub fn positive_amount(value: Decimal) -> DomainResult<()> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(DomainError::validation("Amount must be positive"))
    }
}

/// Renewal length in months; defaults to a year when omitted.
pub fn renewal_months(value: Option<i64>) -> DomainResult<u32> {
    let months = value.unwrap_or(12);
    if (1..=36).contains(&months) {
        Ok(u32::try_from(months).unwrap_or(12))
    } else {
        Err(DomainError::validation("Months must be between 1 and 36"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_optional_plus_and_10_to_15_digits() {
        assert!(phone("+919876543210").is_ok());
        assert!(phone("9876543210").is_ok());
        assert!(phone("123456789").is_err());
        assert!(phone("+12-34567890").is_err());
        assert!(phone("1234567890123456").is_err());
    }

    #[test]
    fn email_requires_at_and_dot() {
        assert!(email("rahul.sharma@example.com").is_ok());
        assert!(email("not-an-email").is_err());
        assert!(email("a@b").is_err());
    }

    #[test]
    fn bounds_report_the_first_violation() {
        assert_eq!(
            name("A").unwrap_err().to_string(),
            "Name must be at least 2 characters"
        );
        assert_eq!(
            address("a b").unwrap_err().to_string(),
            "Address must be at least 5 characters"
        );
        assert_eq!(
            description("too short").unwrap_err().to_string(),
            "Description must be at least 10 characters"
        );
        assert_eq!(
            service_type("R").unwrap_err().to_string(),
            "Service type required"
        );
    }

    #[test]
    fn amount_must_be_strictly_positive() {
        assert!(positive_amount(Decimal::new(1, 2)).is_ok());
        assert_eq!(
            positive_amount(Decimal::ZERO).unwrap_err().to_string(),
            "Amount must be positive"
        );
        assert!(positive_amount(Decimal::new(-500, 0)).is_err());
    }

    #[test]
    fn renewal_months_defaults_and_bounds() {
        assert_eq!(renewal_months(None).unwrap(), 12);
        assert_eq!(renewal_months(Some(1)).unwrap(), 1);
        assert_eq!(renewal_months(Some(36)).unwrap(), 36);
        assert!(renewal_months(Some(0)).is_err());
        assert!(renewal_months(Some(37)).is_err());
        assert!(renewal_months(Some(-3)).is_err());
    }
}
