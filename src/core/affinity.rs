//! Side-by-side comparison of two countries through their representative programs.

use crate::core::corrections::correction_for_program;
use crate::domain::model::{BachelorProgram, Country};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffinityLevel {
    Equivalent,
    Moderate,
    Low,
    /// Never counted towards the overall rating.
    AlwaysConvertible,
}

impl fmt::Display for AffinityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AffinityLevel::Equivalent => write!(f, "EQUIVALENT"),
            AffinityLevel::Moderate => write!(f, "MODERATE"),
            AffinityLevel::Low => write!(f, "LOW"),
            AffinityLevel::AlwaysConvertible => write!(f, "CAN ALWAYS BE CONVERTED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub category: &'static str,
    pub first: String,
    pub second: String,
    pub level: AffinityLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct AffinityReport {
    pub first_country: String,
    pub second_country: String,
    pub rows: Vec<ComparisonRow>,
    pub overall: AffinityLevel,
}

/// One side of a comparison.
#[derive(Debug, Clone, Copy)]
pub struct Profile<'a> {
    pub country: &'a Country,
    pub program: &'a BachelorProgram,
}

pub fn duration_affinity(first: i32, second: i32) -> AffinityLevel {
    match (first - second).abs() {
        0 => AffinityLevel::Equivalent,
        1 => AffinityLevel::Moderate,
        _ => AffinityLevel::Low,
    }
}

/// Relative gap against the larger total: up to 10% is equivalent, up to 25% moderate.
pub fn credits_affinity(first: i32, second: i32) -> AffinityLevel {
    let larger = first.max(second);
    if larger <= 0 {
        return if first == second {
            AffinityLevel::Equivalent
        } else {
            AffinityLevel::Low
        };
    }
    let gap = f64::from((first - second).abs()) / f64::from(larger) * 100.0;
    if gap <= 10.0 {
        AffinityLevel::Equivalent
    } else if gap <= 25.0 {
        AffinityLevel::Moderate
    } else {
        AffinityLevel::Low
    }
}

pub fn credit_ratio_affinity(first: Option<&str>, second: Option<&str>) -> AffinityLevel {
    if first == second {
        AffinityLevel::Equivalent
    } else {
        AffinityLevel::Moderate
    }
}

pub fn eqf_affinity(first: i32, second: i32) -> AffinityLevel {
    duration_affinity(first, second)
}

pub fn overall_affinity(levels: &[AffinityLevel]) -> AffinityLevel {
    let comparable: Vec<AffinityLevel> = levels
        .iter()
        .copied()
        .filter(|l| *l != AffinityLevel::AlwaysConvertible)
        .collect();

    if comparable.contains(&AffinityLevel::Low) {
        AffinityLevel::Low
    } else if comparable.iter().all(|l| *l == AffinityLevel::Equivalent) {
        AffinityLevel::Equivalent
    } else {
        AffinityLevel::Moderate
    }
}

/// Duration label, showing the source value for corrected special programs (`3.5`).
pub fn display_duration(country: &Country, program: &BachelorProgram) -> String {
    if program.is_special_program {
        if let Some(correction) = correction_for_program(&country.name, program.duration) {
            return correction.source_duration().to_string();
        }
    }
    program.duration.to_string()
}

pub fn compare(first: Profile<'_>, second: Profile<'_>) -> AffinityReport {
    let rows = vec![
        ComparisonRow {
            category: "STANDARD DURATION",
            first: format!("{} YEARS", display_duration(first.country, first.program)),
            second: format!("{} YEARS", display_duration(second.country, second.program)),
            level: duration_affinity(first.program.duration, second.program.duration),
        },
        ComparisonRow {
            category: "TOTAL CREDITS",
            first: format!("{} ECTS", first.program.total_credits),
            second: format!("{} ECTS", second.program.total_credits),
            level: credits_affinity(first.program.total_credits, second.program.total_credits),
        },
        ComparisonRow {
            category: "CREDIT RATIO",
            first: first.country.credit_ratio.clone().unwrap_or_default(),
            second: second.country.credit_ratio.clone().unwrap_or_default(),
            level: credit_ratio_affinity(
                first.country.credit_ratio.as_deref(),
                second.country.credit_ratio.as_deref(),
            ),
        },
        ComparisonRow {
            category: "EQF LEVEL",
            first: first.program.eqf_level.to_string(),
            second: second.program.eqf_level.to_string(),
            level: eqf_affinity(first.program.eqf_level, second.program.eqf_level),
        },
        ComparisonRow {
            category: "GRADING SYSTEM",
            first: first.country.grading_system.clone(),
            second: second.country.grading_system.clone(),
            level: AffinityLevel::AlwaysConvertible,
        },
    ];

    let levels: Vec<AffinityLevel> = rows.iter().map(|r| r.level).collect();
    AffinityReport {
        first_country: first.country.name.clone(),
        second_country: second.country.name.clone(),
        overall: overall_affinity(&levels),
        rows,
    }
}
