use std::sync::OnceLock;

use regex::Regex;

use shared_models::error::AppError;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
    })
}

pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email) && email.len() <= 254
}

/// Trims `value` and rejects it when nothing is left.
pub fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Normalizes optional free text: blank becomes `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("doc@gmail.com"));
        assert!(validate_email("first.last+tag@clinic.example.ie"));
        assert!(!validate_email("no-at-sign"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email(""));
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("name", "  Cardiology ").unwrap(), "Cardiology");
        assert!(required("name", "   ").is_err());
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(Some(" text ")), Some("text".to_string()));
    }
}
