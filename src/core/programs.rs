use crate::core::corrections::find_correction;
use crate::core::{cell, layout, numeric};
use crate::domain::model::{Country, NewBachelorProgram, SourceRow};

pub const DEFAULT_CREDITS_PER_YEAR: i32 = 60;
pub const DEFAULT_EQF_LEVEL: i32 = 6;

/// Expands the duration slots of a country row into program candidates, one per
/// non-blank duration cell. The slot number is the program duration.
pub fn expand_programs(country: &Country, row: &SourceRow) -> Vec<NewBachelorProgram> {
    let eqf_level = eqf_level(row);
    let denomination = cell::read(row, layout::OFFICIAL_DENOMINATION).unwrap_or_default();

    layout::DURATION_SLOTS
        .filter_map(|slot| {
            let raw_duration = cell::read(row, layout::duration_column(slot))?;
            Some(program_for_slot(
                country,
                row,
                slot,
                &raw_duration,
                eqf_level,
                &denomination,
            ))
        })
        .collect()
}

fn program_for_slot(
    country: &Country,
    row: &SourceRow,
    slot: i32,
    raw_duration: &str,
    eqf_level: i32,
    denomination: &str,
) -> NewBachelorProgram {
    let is_special = raw_duration.contains('*');
    let credits_raw = cell::read(row, layout::credits_column(slot));
    let mut credits_per_year =
        numeric::parse_numeric_or(credits_raw.as_deref(), DEFAULT_CREDITS_PER_YEAR);

    let correction = find_correction(&country.name, raw_duration, slot);
    if let Some(forced) = correction.and_then(|c| c.credits_per_year) {
        credits_per_year = forced;
    }

    let program = NewBachelorProgram::new(
        country.id,
        slot,
        is_special,
        credits_per_year,
        eqf_level,
        denomination,
    );

    match correction.and_then(|c| c.total_credits) {
        Some(total) => {
            tracing::debug!(
                "Applying data correction for {} slot {} ({}): total credits {} -> {}",
                country.name,
                slot,
                raw_duration,
                program.total_credits,
                total
            );
            program.with_total_credits(total)
        }
        None => program,
    }
}

fn eqf_level(row: &SourceRow) -> i32 {
    let raw = cell::read(row, layout::EQF_LEVEL);
    match numeric::parse_numeric(raw.as_deref()) {
        Some(level) if (1..=8).contains(&level) => level,
        Some(level) => {
            tracing::debug!(
                "Row {}: EQF level {} out of range, using {}",
                row.number,
                level,
                DEFAULT_EQF_LEVEL
            );
            DEFAULT_EQF_LEVEL
        }
        None => DEFAULT_EQF_LEVEL,
    }
}
