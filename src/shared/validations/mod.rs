/// Clamp user supplied paging values: page is 1-based, limit is 1..=100.
pub fn validate_pagination(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

/// Validate an `HH:MM` wall-clock time (24h).
pub fn validate_hhmm(value: &str) -> Result<(), validator::ValidationError> {
    let bytes = value.as_bytes();
    let ok = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit())
        && matches!(value[..2].parse::<u32>(), Ok(h) if h < 24)
        && matches!(value[3..].parse::<u32>(), Ok(m) if m < 60);
    if ok {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("hhmm");
        err.message = Some("expected HH:MM".into());
        Err(err)
    }
}
