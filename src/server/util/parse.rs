use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses an optional stored snowflake, keeping `None` as `None`.
pub fn parse_optional_u64(value: Option<String>) -> Result<Option<u64>, AppError> {
    value.map(parse_u64_from_string).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_snowflake() {
        assert_eq!(parse_u64_from_string("123456789".to_string()).unwrap(), 123456789);
    }

    /// Expected: stored garbage is an internal error
    #[test]
    fn rejects_stored_garbage() {
        let result = parse_u64_from_string("abc".to_string());
        assert!(matches!(result, Err(AppError::InternalErr(_))));
    }

    #[test]
    fn optional_passes_none_through() {
        assert_eq!(parse_optional_u64(None).unwrap(), None);
        assert_eq!(parse_optional_u64(Some("5".to_string())).unwrap(), Some(5));
    }
}
