use crate::utils::error::{PricingError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PricingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Required form fields: only the empty string counts as missing.
pub fn validate_required_text(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PricingError::missing(field_name));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::invalid_input(
            field_name,
            format!("{} must be a non-negative number", value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so check containment rather than exclusion
    if !(value >= min && value <= max) {
        return Err(PricingError::invalid_input(
            field_name,
            format!("{} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

pub fn validate_config_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    validate_range(field_name, value, min, max).map_err(|_| {
        PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("backend.base_url", "http://localhost:3001").is_ok());
        assert!(validate_url("backend.base_url", "https://api.example.com").is_ok());
        assert!(validate_url("backend.base_url", "").is_err());
        assert!(validate_url("backend.base_url", "localhost").is_err());
        assert!(validate_url("backend.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("title", "Audit").is_ok());
        assert!(validate_required_text("title", "   ").is_ok());
        assert!(matches!(
            validate_required_text("title", ""),
            Err(PricingError::MissingRequiredField { ref field }) if field == "title"
        ));
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("discount_percent", 50.0, 0.0, 100.0).is_ok());
        assert!(validate_range("discount_percent", 100.5, 0.0, 100.0).is_err());
        assert!(validate_range("discount_percent", f64::NAN, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("displacement_fee", 0.0).is_ok());
        assert!(validate_non_negative("displacement_fee", -10.0).is_err());
        assert!(validate_non_negative("displacement_fee", f64::INFINITY).is_err());
    }
}
