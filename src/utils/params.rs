use ecam_core::ServiceError;

/// Parses a numeric id taken from a path segment.
pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ServiceError::validation("Invalid ID"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(matches!(parse_id("abc"), Err(ServiceError::Validation(_))));
        assert!(parse_id("").is_err());
    }
}
