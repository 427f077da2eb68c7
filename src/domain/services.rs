//! Catalog operations for callers outside the import: administrative registration,
//! lookups, and the representative-program query.
//!
//! Registration applies stricter rules than the import does, because the import has to
//! accept the source sheet as it is.

use crate::core::affinity::{self, AffinityReport, Profile};
use crate::core::selector;
use crate::domain::model::{
    BachelorProgram, Country, CountryId, NewBachelorProgram, NewCountry,
};
use crate::domain::ports::CatalogStore;
use crate::utils::error::{AtlasError, Result};
use crate::utils::validation::{validate_length, validate_non_empty_string, validate_range};
use regex::Regex;
use std::sync::LazyLock;

static GRADING_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+-.+$").expect("grading format pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRegistration {
    pub name: String,
    pub years_compulsory_schooling: i32,
    pub grading_system: String,
    pub credit_ratio: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRegistration {
    pub country_id: CountryId,
    pub duration: i32,
    pub is_special_program: Option<bool>,
    pub credits_per_year: i32,
    pub eqf_level: i32,
    pub official_denomination: String,
}

impl CountryRegistration {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("Country name", &self.name)?;
        validate_length("Country name", &self.name, 2, 20)?;
        validate_range(
            "Years of compulsory schooling",
            self.years_compulsory_schooling,
            12,
            13,
        )?;
        if !GRADING_FORMAT.is_match(self.grading_system.trim()) {
            return Err(AtlasError::validation(
                "Grading system must follow format: worst-best (e.g., 18-30, F-A)",
            ));
        }
        if let Some(code) = &self.country_code {
            if code.trim().chars().count() != 2 {
                return Err(AtlasError::validation("Country code must have 2 letters"));
            }
        }
        Ok(())
    }
}

impl ProgramRegistration {
    fn validate(&self) -> Result<()> {
        validate_range("BA duration", self.duration, 1, 6)?;
        validate_range("Credits per year", self.credits_per_year, 15, 80)?;
        validate_range("EQF level", self.eqf_level, 1, 8)?;
        validate_non_empty_string("Official denomination", &self.official_denomination)?;
        validate_length("Official denomination", &self.official_denomination, 2, 50)
    }
}

pub struct CatalogService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn find_country(&self, id: CountryId) -> Result<Country> {
        self.store
            .find_country(id)
            .await?
            .ok_or_else(|| AtlasError::not_found(format!("Country not found with id: {}", id)))
    }

    pub async fn find_country_by_name(&self, name: &str) -> Result<Country> {
        self.store
            .find_country_by_name(name)
            .await?
            .ok_or_else(|| AtlasError::not_found(format!("Country not found with name: {}", name)))
    }

    pub async fn register_country(&self, registration: CountryRegistration) -> Result<Country> {
        registration.validate()?;
        if self.store.country_exists(&registration.name).await? {
            return Err(AtlasError::duplicate(format!(
                "Country with name '{}' already exists",
                registration.name.trim()
            )));
        }

        let country = self
            .store
            .create_country(NewCountry {
                name: registration.name.trim().to_string(),
                years_compulsory_schooling: registration.years_compulsory_schooling,
                grading_system: registration.grading_system.trim().to_string(),
                credit_ratio: registration.credit_ratio,
                country_code: registration.country_code.map(|c| c.trim().to_uppercase()),
            })
            .await?;
        tracing::info!("Registered country {} (id {})", country.name, country.id);
        Ok(country)
    }

    pub async fn register_program(&self, registration: ProgramRegistration) -> Result<BachelorProgram> {
        registration.validate()?;
        let country = self.find_country(registration.country_id).await?;

        let existing = self.store.programs_for_country(country.id).await?;
        if existing.iter().any(|p| p.duration == registration.duration) {
            return Err(AtlasError::duplicate(format!(
                "Program with duration {} years already exists for country {}",
                registration.duration, country.name
            )));
        }

        let program = self
            .store
            .create_program(NewBachelorProgram::new(
                country.id,
                registration.duration,
                registration.is_special_program.unwrap_or(false),
                registration.credits_per_year,
                registration.eqf_level,
                registration.official_denomination.trim(),
            ))
            .await?;
        tracing::info!(
            "Registered {}-year program for {} (id {})",
            program.duration,
            country.name,
            program.id
        );
        Ok(program)
    }

    pub async fn programs_for(&self, country_id: CountryId) -> Result<Vec<BachelorProgram>> {
        self.find_country(country_id).await?;
        self.store.programs_for_country(country_id).await
    }

    pub async fn delete_country(&self, country_id: CountryId) -> Result<()> {
        self.store.delete_country(country_id).await?;
        tracing::info!("Deleted country {} and its programs", country_id);
        Ok(())
    }

    pub async fn representative_program_for(&self, country_id: CountryId) -> Result<BachelorProgram> {
        selector::representative_program_for(&self.store, country_id).await
    }

    /// Compares two countries by name through their representative programs.
    pub async fn compare(&self, first: &str, second: &str) -> Result<AffinityReport> {
        let first_country = self.find_country_by_name(first).await?;
        let second_country = self.find_country_by_name(second).await?;
        let first_program = self.representative_program_for(first_country.id).await?;
        let second_program = self.representative_program_for(second_country.id).await?;

        Ok(affinity::compare(
            Profile {
                country: &first_country,
                program: &first_program,
            },
            Profile {
                country: &second_country,
                program: &second_program,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::MemoryStore;
    use crate::core::affinity::AffinityLevel;

    fn italy() -> CountryRegistration {
        CountryRegistration {
            name: "Italy".to_string(),
            years_compulsory_schooling: 13,
            grading_system: "18-30".to_string(),
            credit_ratio: Some("25/30".to_string()),
            country_code: Some("it".to_string()),
        }
    }

    fn laurea(country_id: CountryId, duration: i32) -> ProgramRegistration {
        ProgramRegistration {
            country_id,
            duration,
            is_special_program: None,
            credits_per_year: 60,
            eqf_level: 6,
            official_denomination: "Laurea Triennale".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_country_and_duplicate() {
        let service = CatalogService::new(MemoryStore::new());
        let country = service.register_country(italy()).await.unwrap();
        assert_eq!(country.country_code.as_deref(), Some("IT"));

        let err = service.register_country(italy()).await.unwrap_err();
        assert!(matches!(err, AtlasError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_register_country_validation() {
        let service = CatalogService::new(MemoryStore::new());

        let mut bad = italy();
        bad.years_compulsory_schooling = 9;
        assert!(service.register_country(bad).await.is_err());

        let mut bad = italy();
        bad.grading_system = "excellent".to_string();
        assert!(service.register_country(bad).await.is_err());

        let mut bad = italy();
        bad.name = "X".to_string();
        assert!(service.register_country(bad).await.is_err());
    }

    #[tokio::test]
    async fn test_register_program_rules() {
        let service = CatalogService::new(MemoryStore::new());
        let country = service.register_country(italy()).await.unwrap();

        let program = service.register_program(laurea(country.id, 3)).await.unwrap();
        assert_eq!(program.total_credits, 180);
        assert!(!program.is_special_program);

        let mut special = laurea(country.id, 3);
        special.is_special_program = Some(true);
        let err = service.register_program(special).await.unwrap_err();
        assert!(matches!(err, AtlasError::Duplicate { .. }));

        let mut heavy = laurea(country.id, 4);
        heavy.credits_per_year = 90;
        assert!(service.register_program(heavy).await.is_err());

        let missing = service.register_program(laurea(77, 3)).await.unwrap_err();
        assert!(matches!(missing, AtlasError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_compare_and_delete() {
        let service = CatalogService::new(MemoryStore::new());
        let it = service.register_country(italy()).await.unwrap();
        let de = service
            .register_country(CountryRegistration {
                name: "Germany".to_string(),
                years_compulsory_schooling: 13,
                grading_system: "5-1".to_string(),
                credit_ratio: Some("25/30".to_string()),
                country_code: Some("DE".to_string()),
            })
            .await
            .unwrap();
        service.register_program(laurea(it.id, 3)).await.unwrap();
        service.register_program(laurea(de.id, 4)).await.unwrap();

        let report = service.compare("italy", "GERMANY").await.unwrap();
        assert_eq!(report.first_country, "Italy");
        assert_eq!(report.rows[0].level, AffinityLevel::Moderate);
        assert_eq!(report.overall, AffinityLevel::Moderate);

        service.delete_country(de.id).await.unwrap();
        assert!(service.programs_for(de.id).await.is_err());
        assert!(matches!(
            service.compare("Italy", "Germany").await,
            Err(AtlasError::NotFound { .. })
        ));
    }
}
