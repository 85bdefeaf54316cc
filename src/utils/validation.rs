use crate::utils::error::{PatternError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PatternError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PatternError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PatternError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PatternError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PatternError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(PatternError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PatternError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("proxy_max_retries", 3, 1).is_ok());
        assert!(validate_positive_number("proxy_max_retries", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("work_delay_ms", 10u64, 0, 1000).is_ok());
        assert!(validate_range("work_delay_ms", 1001u64, 0, 1000).is_err());
        assert!(validate_range("room_quality", 0u8, 1, 5).is_err());
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("config", "patterns.toml").is_ok());
        assert!(validate_path("config", "").is_err());
        assert!(validate_non_empty_string("catalog.name", "   ").is_err());
        assert!(validate_one_of("run.log_level", "debug", &["info", "debug"]).is_ok());
        assert!(validate_one_of("run.log_level", "loud", &["info", "debug"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3u32);
        let absent: Option<u32> = None;
        assert_eq!(*validate_required_field("seed", &present).unwrap(), 3);
        assert!(matches!(
            validate_required_field("seed", &absent),
            Err(PatternError::MissingConfigError { .. })
        ));
    }
}
