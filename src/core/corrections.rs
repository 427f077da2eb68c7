//! Known source-data anomalies and how each one is patched.
//!
//! Entries match on the exact (trimmed) duration cell, not on its parsed value, so a
//! correction never spreads to other fractional durations.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataCorrection {
    pub country: &'static str,
    pub raw_duration: &'static str,
    pub slot: i32,
    pub credits_per_year: Option<i32>,
    pub total_credits: Option<i32>,
}

impl DataCorrection {
    pub fn matches(&self, country: &str, raw_duration: &str, slot: i32) -> bool {
        self.slot == slot
            && self.raw_duration == raw_duration
            && self.country.eq_ignore_ascii_case(country)
    }

    /// The duration as the source sheet wrote it, without markers (`3.5*` -> `3.5`).
    pub fn source_duration(&self) -> &'static str {
        self.raw_duration.trim_end_matches('*')
    }
}

/// Poland lists a 3.5-year special program in the 4-year slot: 60 credits a year,
/// 210 in total.
pub const DATA_CORRECTIONS: &[DataCorrection] = &[DataCorrection {
    country: "Poland",
    raw_duration: "3.5*",
    slot: 4,
    credits_per_year: Some(60),
    total_credits: Some(210),
}];

pub fn find_correction(country: &str, raw_duration: &str, slot: i32) -> Option<&'static DataCorrection> {
    DATA_CORRECTIONS
        .iter()
        .find(|c| c.matches(country, raw_duration, slot))
}

/// Correction applied to a stored special program of `duration` years, if any.
pub fn correction_for_program(country: &str, duration: i32) -> Option<&'static DataCorrection> {
    DATA_CORRECTIONS
        .iter()
        .find(|c| c.slot == duration && c.country.eq_ignore_ascii_case(country))
}
