//! Grading scale extraction.
//!
//! The matrix stores the best grade in one column and the worst grade in another, in
//! whatever notation each country uses: letters (`A`, `F`), single numbers, ranges
//! (`18-30`, `1 - 1.5`) or `low|high` alternatives. Both columns go through
//! [`extract_grade`] and the results are joined as `"<worst>-<best>"`.

use regex::Regex;
use std::sync::LazyLock;

pub const GRADING_UNKNOWN: &str = "N/A";

static LETTER_GRADE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+").expect("letter grade pattern"));
static NUMERIC_GRADE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("numeric grade pattern"));

/// Extracts one bound of a grading scale from a cell.
///
/// `want_higher` selects the better grade. For `a|b` the last non-blank alternative is
/// used when the better grade is wanted, the first otherwise.
pub fn extract_grade(value: Option<&str>, want_higher: bool) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if value.contains('|') {
        let selected = if want_higher {
            value.split('|').rfind(|part| !part.trim().is_empty())
        } else {
            value.split('|').next()
        };
        return extract_from_segment(selected?.trim(), want_higher);
    }

    extract_from_segment(value, want_higher)
}

/// Letter grades first, then numbers. Never sees a `|`.
fn extract_from_segment(segment: &str, want_higher: bool) -> Option<String> {
    if segment.is_empty() {
        return None;
    }

    if let Some(letters) = LETTER_GRADE.find(segment) {
        return Some(letters.as_str().to_string());
    }

    let tokens: Vec<(f64, &str)> = NUMERIC_GRADE
        .find_iter(segment)
        .filter_map(|m| m.as_str().parse::<f64>().ok().map(|n| (n, m.as_str())))
        .collect();

    let (first, _) = *tokens.first()?;
    if tokens.len() == 1 {
        return Some(render(tokens[0]));
    }

    let lower_is_better = (1.0..=6.0).contains(&first);
    let pick_min = want_higher == lower_is_better;

    let chosen = tokens.iter().copied().reduce(|best, candidate| {
        let better = if pick_min {
            candidate.0 < best.0
        } else {
            candidate.0 > best.0
        };
        if better {
            candidate
        } else {
            best
        }
    })?;

    Some(render(chosen))
}

fn render((number, text): (f64, &str)) -> String {
    if number.fract() == 0.0 {
        format!("{}", number as i64)
    } else {
        text.to_string()
    }
}

/// Builds the `"<worst>-<best>"` grading string, or `"N/A"` if either bound is missing.
pub fn grading_system(best_column: Option<&str>, worst_column: Option<&str>) -> String {
    let higher = extract_grade(best_column, true);
    let lower = extract_grade(worst_column, false);

    match (lower, higher) {
        (Some(lower), Some(higher)) => format!("{}-{}", lower, higher),
        _ => GRADING_UNKNOWN.to_string(),
    }
}
