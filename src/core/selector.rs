use crate::domain::model::{BachelorProgram, Country, CountryId};
use crate::domain::ports::CatalogStore;
use crate::utils::error::{AtlasError, Result};

/// Compulsory schooling plus bachelor studies are expected to add up to this many years.
pub const TOTAL_EDUCATION_YEARS: i32 = 16;

/// Picks the program that stands for `country_id` in cross-country comparisons.
///
/// Prefers the non-special program of `16 - years_compulsory_schooling` years; otherwise
/// the longest program. Ties on the longest duration go to the lowest program id.
pub async fn representative_program_for<S: CatalogStore>(
    store: &S,
    country_id: CountryId,
) -> Result<BachelorProgram> {
    let country = store
        .find_country(country_id)
        .await?
        .ok_or_else(|| AtlasError::not_found(format!("country not found with id: {}", country_id)))?;

    let programs = store.programs_for_country(country_id).await?;
    select_representative(&country, &programs)
        .cloned()
        .ok_or_else(|| AtlasError::not_found(format!("no programs found for country {}", country_id)))
}

pub fn select_representative<'a>(
    country: &Country,
    programs: &'a [BachelorProgram],
) -> Option<&'a BachelorProgram> {
    let standard_duration = TOTAL_EDUCATION_YEARS - country.years_compulsory_schooling;

    let standard = programs
        .iter()
        .filter(|p| p.country_id == country.id)
        .filter(|p| !p.is_special_program && p.duration == standard_duration)
        .min_by_key(|p| p.id);
    if standard.is_some() {
        return standard;
    }

    programs
        .iter()
        .filter(|p| p.country_id == country.id)
        .min_by_key(|p| (std::cmp::Reverse(p.duration), p.id))
}
