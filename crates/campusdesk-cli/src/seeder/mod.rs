//! Database seeding with fake data.
//!
//! Rows are generated in parallel with Rayon, personal columns are sealed
//! with the configured [`FieldCipher`], and everything is written in a single
//! transaction using multi-value INSERT statements of [`BATCH_SIZE`] rows.
//! Primary keys are generated here so that child rows can reference their
//! parents without a round trip.
//!
//! Names and codes carry a short tag unique to each run, so seeding twice
//! does not trip the unique constraints.

pub mod academics;
pub mod institutions;
pub mod models;
pub mod staff;
pub mod students;
pub mod users;

pub use models::{BATCH_SIZE, SeedConfig, SeedSummary};

use campusdesk_crypto::FieldCipher;
use chrono::{Datelike, NaiveDate, Utc};
use fake::Fake;
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

/// Seeds a full hierarchy of institutions and everything below them.
pub async fn seed_all(
    db: &PgPool,
    cipher: &FieldCipher,
    config: &SeedConfig,
) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    let tag = run_tag();
    println!("🌱 Seeding with run tag {}", tag);

    let mut tx = db.begin().await?;
    let mut summary = SeedSummary::default();

    let institutions = institutions::generate_institutions(config.institutions, &tag);
    summary.institutions = institutions::insert_institutions(&mut tx, &institutions).await?;

    let facilities =
        institutions::generate_facilities(&institutions, config.facilities_per_institution);
    summary.facilities = institutions::insert_facilities(&mut tx, &facilities).await?;

    let faculties =
        academics::generate_faculties(&institutions, config.faculties_per_institution);
    summary.faculties = academics::insert_faculties(&mut tx, &faculties).await?;

    let departments = academics::generate_departments(&faculties, config.departments_per_faculty);
    summary.departments = academics::insert_departments(&mut tx, &departments).await?;

    let programs =
        academics::generate_programs(&departments, config.programs_per_department, &tag);
    summary.programs = academics::insert_programs(&mut tx, &programs).await?;
    summary.fee_structures = academics::insert_fee_structures(&mut tx, &programs).await?;

    let mut students = students::generate_students(
        cipher,
        &institutions,
        &programs,
        config.students_per_institution,
        &tag,
    )?;
    let mut staff = staff::generate_staff(
        cipher,
        &institutions,
        &departments,
        config.staff_per_institution,
        &tag,
    )?;

    // Accounts first, so the user_id references resolve.
    let users = users::link_users(&mut students, &mut staff);
    summary.users = users::insert_users(&mut tx, &users).await?;

    summary.students = students::insert_students(&mut tx, &students).await?;

    let payments = students::generate_payments(&students, config.payments_per_student);
    summary.payments = students::insert_payments(&mut tx, &payments).await?;

    summary.staff = staff::insert_staff(&mut tx, &staff).await?;

    let vacancies =
        staff::generate_vacancies(&institutions, &departments, config.vacancies_per_institution);
    summary.vacancies = staff::insert_vacancies(&mut tx, &vacancies).await?;

    tx.commit().await?;

    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(summary)
}

/// Deletes all institutional data. Students go first because they hold
/// restricting references to institutions and programs; every other table
/// cascades from institutions. Of the mirrored users, only the accounts the
/// seeder created are removed.
pub async fn clear_all(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let mut tx = db.begin().await?;

    let students = sqlx::query("DELETE FROM students")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let institutions = sqlx::query("DELETE FROM institutions")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let users = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", users::SEED_EMAIL_DOMAIN))
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} students, {} institutions and {} seeded accounts in {:?}",
        students,
        institutions,
        users,
        start_time.elapsed()
    );

    Ok(students + institutions + users)
}

/// Builds `($1, $2), ($3, $4), ...` for a multi-value INSERT.
pub(crate) fn values_clause(rows: usize, columns: usize) -> String {
    (0..rows)
        .map(|row| {
            let params: Vec<String> = (1..=columns)
                .map(|col| format!("${}", row * columns + col))
                .collect();
            format!("({})", params.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Picks a random entry of a constant, non-empty table.
pub(crate) fn pick<T: Copy>(items: &[T]) -> T {
    items[(0..items.len()).fake::<usize>()]
}

/// Picks a random entry of a slice that may be empty.
pub(crate) fn choose<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    items.get((0..items.len()).fake::<usize>())
}

pub(crate) fn current_year() -> i32 {
    Utc::now().year()
}

pub(crate) fn random_date_in(year: i32) -> NaiveDate {
    NaiveDate::from_yo_opt(year, (1..366).fake::<u32>()).unwrap_or(NaiveDate::MIN)
}

fn run_tag() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_uppercase()
}
