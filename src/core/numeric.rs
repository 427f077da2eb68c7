/// Lenient integer reader for matrix cells such as `13*`, `12|13*` or `3.2`.
///
/// The last non-blank `|` alternative wins, `*` markers are dropped and decimals are
/// rounded up. Anything unparseable comes back as `None` rather than an error.
pub fn parse_numeric(value: Option<&str>) -> Option<i32> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    let token = value.split('|').rfind(|part| !part.trim().is_empty())?;
    let clean: String = token.chars().filter(|c| *c != '*').collect();
    let clean = clean.trim();

    let parsed = if clean.contains('.') {
        clean
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|n| n.ceil() as i32)
    } else {
        clean.parse::<i32>().ok()
    };

    if parsed.is_none() {
        tracing::debug!("Could not parse numeric token: {:?}", value);
    }
    parsed
}

pub fn parse_numeric_or(value: Option<&str>, fallback: i32) -> i32 {
    parse_numeric(value).unwrap_or(fallback)
}
