//! Normalized disruption records.

/// Severity reported for a line running normally. Lines with this
/// severity are never relayed to the watch.
pub const GOOD_SERVICE: &str = "Good Service";

/// Severity substituted when upstream sends none.
pub const UNKNOWN_SEVERITY: &str = "?";

/// Maximum reason length in characters, including the truncation marker.
/// The watch stores reasons in a fixed buffer of this size.
pub const MAX_REASON_LENGTH: usize = 512;

/// Appended to reasons cut short at [`MAX_REASON_LENGTH`].
pub const TRUNCATION_MARKER: &str = " ...";

/// A disrupted line, ready for transmission.
///
/// `line` is kept as the raw upstream id; it is resolved to a
/// [`LineCode`](super::LineCode) only when the message is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisruptionRecord {
    /// Upstream line id (e.g. "victoria").
    pub line: String,
    /// Severity description, never empty.
    pub severity: String,
    /// Disruption reason, at most [`MAX_REASON_LENGTH`] characters.
    pub reason: String,
}

impl DisruptionRecord {
    /// Build a record, normalizing severity and reason.
    pub fn new(line: impl Into<String>, severity: Option<&str>, reason: Option<&str>) -> Self {
        Self {
            line: line.into(),
            severity: normalize_severity(severity),
            reason: clamp_reason(reason.unwrap_or_default()),
        }
    }
}

/// Substitute [`UNKNOWN_SEVERITY`] for a missing or empty severity.
pub fn normalize_severity(severity: Option<&str>) -> String {
    match severity {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => UNKNOWN_SEVERITY.to_string(),
    }
}

/// Clamp a reason to [`MAX_REASON_LENGTH`] characters.
///
/// Longer reasons keep their leading characters and end with
/// [`TRUNCATION_MARKER`], so the result is exactly the maximum length.
/// Lengths are counted in characters, not bytes.
pub fn clamp_reason(reason: &str) -> String {
    if reason.chars().nth(MAX_REASON_LENGTH).is_none() {
        return reason.to_string();
    }

    let keep = MAX_REASON_LENGTH - TRUNCATION_MARKER.chars().count();
    let mut clamped: String = reason.chars().take(keep).collect();
    clamped.push_str(TRUNCATION_MARKER);
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_reason_unchanged() {
        assert_eq!(clamp_reason("Signal failure"), "Signal failure");
        assert_eq!(clamp_reason(""), "");
    }

    #[test]
    fn reason_at_limit_unchanged() {
        let reason = "x".repeat(MAX_REASON_LENGTH);
        assert_eq!(clamp_reason(&reason), reason);
    }

    #[test]
    fn reason_of_600_chars_clamped() {
        let reason = "a".repeat(600);
        let clamped = clamp_reason(&reason);

        assert_eq!(clamped.chars().count(), 512);
        assert!(clamped.ends_with("..."));
        assert!(clamped.starts_with(&"a".repeat(508)));
    }

    #[test]
    fn one_over_limit_clamped() {
        let reason = "b".repeat(MAX_REASON_LENGTH + 1);
        let clamped = clamp_reason(&reason);
        assert_eq!(clamped.chars().count(), MAX_REASON_LENGTH);
        assert!(clamped.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn multibyte_reason_counted_in_chars() {
        // 512 two-byte characters fit; 513 do not
        let fits = "é".repeat(MAX_REASON_LENGTH);
        assert_eq!(clamp_reason(&fits), fits);

        let over = "é".repeat(MAX_REASON_LENGTH + 1);
        let clamped = clamp_reason(&over);
        assert_eq!(clamped.chars().count(), MAX_REASON_LENGTH);
        assert!(clamped.ends_with("..."));
    }

    #[test]
    fn severity_defaults() {
        assert_eq!(normalize_severity(Some("Severe Delays")), "Severe Delays");
        assert_eq!(normalize_severity(Some("")), "?");
        assert_eq!(normalize_severity(None), "?");
    }

    #[test]
    fn record_normalizes_fields() {
        let record = DisruptionRecord::new("victoria", Some(""), None);
        assert_eq!(record.line, "victoria");
        assert_eq!(record.severity, UNKNOWN_SEVERITY);
        assert_eq!(record.reason, "");
    }
}
