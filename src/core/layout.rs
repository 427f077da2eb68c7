//! Column positions of the education matrix sheet (0-based) and its data row window.

pub const NAME: usize = 0;
pub const COMPULSORY_SCHOOLING: usize = 1;
/// Duration marker for slot `n` (1..=5) lives at `DURATION_BASE + n`.
pub const DURATION_BASE: usize = 1;
/// Credits per year for slot `n` (1..=5) lives at `CREDITS_BASE + n`.
pub const CREDITS_BASE: usize = 6;
pub const BEST_GRADE: usize = 12;
pub const WORST_GRADE: usize = 16;
pub const EQF_LEVEL: usize = 17;
pub const OFFICIAL_DENOMINATION: usize = 18;
pub const CREDIT_RATIO: usize = 23;
pub const COUNTRY_CODE: usize = 24;

pub const DURATION_SLOTS: std::ops::RangeInclusive<i32> = 1..=5;

/// Two header rows precede the data.
pub const FIRST_DATA_ROW: u32 = 3;
pub const LAST_DATA_ROW: u32 = 33;

pub fn duration_column(slot: i32) -> usize {
    DURATION_BASE + slot as usize
}

pub fn credits_column(slot: i32) -> usize {
    CREDITS_BASE + slot as usize
}
