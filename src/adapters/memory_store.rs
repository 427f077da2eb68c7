use crate::domain::model::{
    BachelorProgram, Country, CountryId, NewBachelorProgram, NewCountry, ProgramId,
};
use crate::domain::ports::CatalogStore;
use crate::utils::error::{AtlasError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    countries: BTreeMap<CountryId, Country>,
    programs: BTreeMap<ProgramId, BachelorProgram>,
    next_country_id: CountryId,
    next_program_id: ProgramId,
}

/// In-process catalog store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all_programs(&self) -> Vec<BachelorProgram> {
        self.tables.read().await.programs.values().cloned().collect()
    }
}

fn check_program(program: &NewBachelorProgram) -> Result<()> {
    if !(1..=6).contains(&program.duration) {
        return Err(AtlasError::validation(format!(
            "duration must be between 1 and 6 years (got {})",
            program.duration
        )));
    }
    if !(1..=8).contains(&program.eqf_level) {
        return Err(AtlasError::validation(format!(
            "EQF level must be between 1 and 8 (got {})",
            program.eqf_level
        )));
    }
    if program.official_denomination.trim().is_empty() {
        return Err(AtlasError::validation("official denomination is required"));
    }
    Ok(())
}

impl CatalogStore for MemoryStore {
    async fn country_exists(&self, name: &str) -> Result<bool> {
        Ok(self.find_country_by_name(name).await?.is_some())
    }

    async fn find_country_by_name(&self, name: &str) -> Result<Option<Country>> {
        let tables = self.tables.read().await;
        let key = name.trim().to_lowercase();
        Ok(tables
            .countries
            .values()
            .find(|c| c.name.to_lowercase() == key)
            .cloned())
    }

    async fn find_country(&self, id: CountryId) -> Result<Option<Country>> {
        Ok(self.tables.read().await.countries.get(&id).cloned())
    }

    async fn list_countries(&self) -> Result<Vec<Country>> {
        let tables = self.tables.read().await;
        let mut countries: Vec<Country> = tables.countries.values().cloned().collect();
        countries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(countries)
    }

    async fn create_country(&self, country: NewCountry) -> Result<Country> {
        let mut tables = self.tables.write().await;
        let name = country.name.trim().to_string();
        if name.is_empty() {
            return Err(AtlasError::validation("country name is required"));
        }
        let key = name.to_lowercase();
        if tables.countries.values().any(|c| c.name.to_lowercase() == key) {
            return Err(AtlasError::duplicate(format!(
                "country with name '{}' already exists",
                name
            )));
        }

        tables.next_country_id += 1;
        let stored = Country {
            id: tables.next_country_id,
            name,
            years_compulsory_schooling: country.years_compulsory_schooling,
            grading_system: country.grading_system,
            credit_ratio: country.credit_ratio,
            country_code: country.country_code,
        };
        tables.countries.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_country(&self, id: CountryId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.countries.remove(&id).is_none() {
            return Err(AtlasError::not_found(format!("country not found with id: {}", id)));
        }
        tables.programs.retain(|_, p| p.country_id != id);
        Ok(())
    }

    async fn create_program(&self, program: NewBachelorProgram) -> Result<BachelorProgram> {
        check_program(&program)?;

        let mut tables = self.tables.write().await;
        let country_name = match tables.countries.get(&program.country_id) {
            Some(country) => country.name.clone(),
            None => {
                return Err(AtlasError::not_found(format!(
                    "country not found with id: {}",
                    program.country_id
                )))
            }
        };

        if !program.is_special_program
            && tables.programs.values().any(|p| {
                p.country_id == program.country_id
                    && p.duration == program.duration
                    && !p.is_special_program
            })
        {
            return Err(AtlasError::duplicate(format!(
                "program with duration {} years already exists for country {}",
                program.duration, country_name
            )));
        }

        tables.next_program_id += 1;
        let stored = BachelorProgram {
            id: tables.next_program_id,
            country_id: program.country_id,
            duration: program.duration,
            is_special_program: program.is_special_program,
            credits_per_year: program.credits_per_year,
            total_credits: program.total_credits,
            eqf_level: program.eqf_level,
            official_denomination: program.official_denomination.trim().to_string(),
        };
        tables.programs.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn programs_for_country(&self, id: CountryId) -> Result<Vec<BachelorProgram>> {
        let tables = self.tables.read().await;
        Ok(tables
            .programs
            .values()
            .filter(|p| p.country_id == id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_country(name: &str) -> NewCountry {
        NewCountry {
            name: name.to_string(),
            years_compulsory_schooling: 13,
            grading_system: "18-30".to_string(),
            credit_ratio: Some("25/30".to_string()),
            country_code: Some("IT".to_string()),
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_on_create() {
        let store = MemoryStore::new();
        let italy = store.create_country(new_country("Italy")).await.unwrap();
        let spain = store.create_country(new_country("Spain")).await.unwrap();
        assert_eq!(italy.id, 1);
        assert_eq!(spain.id, 2);
        assert!(store.country_exists("iTaLy").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_country_is_distinguishable() {
        let store = MemoryStore::new();
        store.create_country(new_country("Italy")).await.unwrap();
        let err = store.create_country(new_country("ITALY")).await.unwrap_err();
        assert!(matches!(err, AtlasError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_unique_names_ignore_non_ascii_case() {
        let store = MemoryStore::new();
        store.create_country(new_country("Österreich")).await.unwrap();

        let err = store.create_country(new_country("ÖSTERREICH")).await.unwrap_err();
        assert!(matches!(err, AtlasError::Duplicate { .. }));
        assert!(store.country_exists("österreich").await.unwrap());
        assert_eq!(store.list_countries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_one_standard_program_per_duration() {
        let store = MemoryStore::new();
        let italy = store.create_country(new_country("Italy")).await.unwrap();

        let standard = NewBachelorProgram::new(italy.id, 3, false, 60, 6, "Laurea");
        store.create_program(standard.clone()).await.unwrap();
        let err = store.create_program(standard).await.unwrap_err();
        assert!(matches!(err, AtlasError::Duplicate { .. }));

        let special = NewBachelorProgram::new(italy.id, 3, true, 60, 6, "Laurea");
        assert!(store.create_program(special).await.is_ok());
    }

    #[tokio::test]
    async fn test_program_field_checks() {
        let store = MemoryStore::new();
        let italy = store.create_country(new_country("Italy")).await.unwrap();

        let too_long = NewBachelorProgram::new(italy.id, 7, false, 60, 6, "Laurea");
        assert!(store.create_program(too_long).await.is_err());
        let bad_eqf = NewBachelorProgram::new(italy.id, 3, false, 60, 9, "Laurea");
        assert!(store.create_program(bad_eqf).await.is_err());
        let unnamed = NewBachelorProgram::new(italy.id, 3, false, 60, 6, "  ");
        assert!(store.create_program(unnamed).await.is_err());
        let orphan = NewBachelorProgram::new(99, 3, false, 60, 6, "Laurea");
        assert!(matches!(
            store.create_program(orphan).await,
            Err(AtlasError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_total_credits_stored_as_given() {
        let store = MemoryStore::new();
        let poland = store.create_country(new_country("Poland")).await.unwrap();
        let draft = NewBachelorProgram::new(poland.id, 4, true, 60, 6, "Licencjat")
            .with_total_credits(210);
        let stored = store.create_program(draft).await.unwrap();
        assert_eq!(stored.total_credits, 210);
    }

    #[tokio::test]
    async fn test_delete_country_cascades() {
        let store = MemoryStore::new();
        let italy = store.create_country(new_country("Italy")).await.unwrap();
        let spain = store.create_country(new_country("Spain")).await.unwrap();
        for (country, duration) in [(italy.id, 3), (italy.id, 5), (spain.id, 4)] {
            store
                .create_program(NewBachelorProgram::new(country, duration, false, 60, 6, "Grado"))
                .await
                .unwrap();
        }

        store.delete_country(italy.id).await.unwrap();

        assert!(store.find_country(italy.id).await.unwrap().is_none());
        assert!(store.programs_for_country(italy.id).await.unwrap().is_empty());
        assert_eq!(store.all_programs().await.len(), 1);
        assert!(matches!(
            store.delete_country(italy.id).await,
            Err(AtlasError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_countries_sorted_by_name() {
        let store = MemoryStore::new();
        for name in ["Spain", "austria", "Italy"] {
            store.create_country(new_country(name)).await.unwrap();
        }
        let names: Vec<String> = store
            .list_countries()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["austria", "Italy", "Spain"]);
    }
}
