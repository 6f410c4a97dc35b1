//! Institution and facility seeding.

use campusdesk_models::{
    FacilityStatus, FacilityType, InstitutionId, InstitutionStatus, InstitutionType, Province,
};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, StreetName};
use fake::faker::boolean::en::Boolean;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{Postgres, Transaction};
use std::time::Instant;

use super::models::{BATCH_SIZE, FacilitySeed, InstitutionSeed};
use super::{current_year, pick, values_clause};

/// Main town of each province, used as the institution location.
const TOWNS: &[(Province, &str)] = &[
    (Province::Harare, "Harare"),
    (Province::Bulawayo, "Bulawayo"),
    (Province::Midlands, "Gweru"),
    (Province::Manicaland, "Mutare"),
    (Province::Masvingo, "Masvingo"),
    (Province::MashonalandEast, "Marondera"),
    (Province::MashonalandWest, "Chinhoyi"),
    (Province::MashonalandCentral, "Bindura"),
    (Province::MatabelelandNorth, "Lupane"),
    (Province::MatabelelandSouth, "Gwanda"),
];

const BUILDINGS: &[&str] = &["Main Building", "North Wing", "South Wing", "Annex", "Block A"];

/// Generates institutions in parallel. Names combine the town, the kind of
/// institution, the run tag and a sequence number.
pub fn generate_institutions(count: usize, tag: &str) -> Vec<InstitutionSeed> {
    let year = current_year();

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let (province, town) = pick(TOWNS);
            let kind = pick(InstitutionType::ALL);
            let street: String = StreetName().fake();
            let building: String = BuildingNumber().fake();

            InstitutionSeed {
                id: InstitutionId::new(),
                name: format!("{} {} {}-{:04}", town, kind.label(), tag, idx + 1),
                kind,
                province,
                location: town.to_string(),
                address: format!("{} {}, {}", building, street, town),
                capacity: (500..8000).fake(),
                staff: (20..400).fake(),
                status: pick(&[
                    InstitutionStatus::Active,
                    InstitutionStatus::Active,
                    InstitutionStatus::Active,
                    InstitutionStatus::Renovation,
                ]),
                established: (1927..year).fake(),
                has_innovation_hub: Boolean(40).fake(),
            }
        })
        .collect()
}

/// Generates facilities for each institution. Names are unique per
/// institution because they carry the per-institution index.
pub fn generate_facilities(
    institutions: &[InstitutionSeed],
    per_institution: usize,
) -> Vec<FacilitySeed> {
    institutions
        .par_iter()
        .flat_map(|institution| {
            (0..per_institution)
                .map(|idx| {
                    let facility_type = pick(FacilityType::ALL);
                    let capacity: i32 = (20..600).fake();
                    let first: String = FirstName().fake();
                    let last: String = LastName().fake();

                    FacilitySeed {
                        institution_id: institution.id,
                        name: format!("{} {}", facility_type.label(), idx + 1),
                        facility_type,
                        building: pick(BUILDINGS).to_string(),
                        capacity,
                        current_usage: (0..capacity + 1).fake(),
                        status: pick(&[
                            FacilityStatus::Active,
                            FacilityStatus::Active,
                            FacilityStatus::Maintenance,
                        ]),
                        manager: format!("{} {}", first, last),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn insert_institutions(
    tx: &mut Transaction<'_, Postgres>,
    institutions: &[InstitutionSeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} institutions...", institutions.len());

    let mut inserted = 0;
    for chunk in institutions.chunks(BATCH_SIZE) {
        inserted += insert_institutions_chunk(tx, chunk).await?;
    }

    println!(
        "   ✓ Inserted {} institutions in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

async fn insert_institutions_chunk(
    tx: &mut Transaction<'_, Postgres>,
    institutions: &[InstitutionSeed],
) -> anyhow::Result<u64> {
    if institutions.is_empty() {
        return Ok(0);
    }

    let sql = format!(
        "INSERT INTO institutions (id, name, type, province, location, address, capacity, \
         staff, status, established, has_innovation_hub) VALUES {}",
        values_clause(institutions.len(), 11)
    );

    let mut query = sqlx::query(&sql);
    for institution in institutions {
        query = query
            .bind(institution.id)
            .bind(&institution.name)
            .bind(institution.kind)
            .bind(institution.province)
            .bind(&institution.location)
            .bind(&institution.address)
            .bind(institution.capacity)
            .bind(institution.staff)
            .bind(institution.status)
            .bind(institution.established)
            .bind(institution.has_innovation_hub);
    }

    Ok(query.execute(&mut **tx).await?.rows_affected())
}

pub async fn insert_facilities(
    tx: &mut Transaction<'_, Postgres>,
    facilities: &[FacilitySeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🏢 Seeding {} facilities...", facilities.len());

    let mut inserted = 0;
    for chunk in facilities.chunks(BATCH_SIZE) {
        inserted += insert_facilities_chunk(tx, chunk).await?;
    }

    println!(
        "   ✓ Inserted {} facilities in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

async fn insert_facilities_chunk(
    tx: &mut Transaction<'_, Postgres>,
    facilities: &[FacilitySeed],
) -> anyhow::Result<u64> {
    if facilities.is_empty() {
        return Ok(0);
    }

    let sql = format!(
        "INSERT INTO facilities (institution_id, name, facility_type, building, capacity, \
         current_usage, status, manager) VALUES {}",
        values_clause(facilities.len(), 8)
    );

    let mut query = sqlx::query(&sql);
    for facility in facilities {
        query = query
            .bind(facility.institution_id)
            .bind(&facility.name)
            .bind(facility.facility_type)
            .bind(&facility.building)
            .bind(facility.capacity)
            .bind(facility.current_usage)
            .bind(facility.status)
            .bind(&facility.manager);
    }

    Ok(query.execute(&mut **tx).await?.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn institutions_have_unique_names_and_matching_towns() {
        let institutions = generate_institutions(40, "ABC123");
        assert_eq!(institutions.len(), 40);

        let names: HashSet<_> = institutions.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names.len(), 40);

        for institution in &institutions {
            assert!(institution.name.contains("ABC123"));
            assert!(institution.name.len() <= 255);
            let town = TOWNS
                .iter()
                .find(|(province, _)| *province == institution.province)
                .map(|(_, town)| *town);
            assert_eq!(town, Some(institution.location.as_str()));
            assert!(institution.established < current_year());
        }
    }

    #[test]
    fn facilities_are_unique_per_institution() {
        let institutions = generate_institutions(3, "T");
        let facilities = generate_facilities(&institutions, 6);
        assert_eq!(facilities.len(), 18);

        let keys: HashSet<_> = facilities
            .iter()
            .map(|f| (f.institution_id, f.name.clone()))
            .collect();
        assert_eq!(keys.len(), 18);
        assert!(facilities.iter().all(|f| f.current_usage <= f.capacity));
    }
}
