//! Staff and vacancy seeding.

use campusdesk_crypto::{CryptoError, FieldCipher};
use campusdesk_models::{InstitutionId, Qualification, StaffPosition, VacancyStatus};
use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use std::time::Instant;

use super::models::{BATCH_SIZE, DepartmentSeed, InstitutionSeed, StaffSeed, VacancySeed};
use super::{choose, current_year, pick, random_date_in, values_clause};

const SPECIALIZATIONS: &[&str] = &[
    "Power Systems",
    "Thermodynamics",
    "Structural Design",
    "Financial Accounting",
    "Software Engineering",
    "Curriculum Studies",
    "Soil Science",
    "Public Health",
];

fn departments_by_institution(
    departments: &[DepartmentSeed],
) -> HashMap<InstitutionId, Vec<&DepartmentSeed>> {
    let mut grouped: HashMap<_, Vec<&DepartmentSeed>> = HashMap::new();
    for department in departments {
        grouped
            .entry(department.institution_id)
            .or_default()
            .push(department);
    }
    grouped
}

fn phone_number() -> String {
    format!(
        "+263 7{} {:03} {:04}",
        pick(&[1, 3, 7, 8]),
        (0..1000).fake::<u32>(),
        (0..10_000).fake::<u32>()
    )
}

/// Generates staff for every institution. Most are placed in a department of
/// their own institution, together with that department's faculty; the rest
/// are unplaced.
pub fn generate_staff(
    cipher: &FieldCipher,
    institutions: &[InstitutionSeed],
    departments: &[DepartmentSeed],
    per_institution: usize,
    tag: &str,
) -> Result<Vec<StaffSeed>, CryptoError> {
    let by_institution = departments_by_institution(departments);
    let year = current_year();

    institutions
        .par_iter()
        .enumerate()
        .flat_map_iter(|(inst_idx, institution)| {
            let local = by_institution
                .get(&institution.id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            (0..per_institution).map(move |idx| -> Result<StaffSeed, CryptoError> {
                let placed: bool = Boolean(80).fake();
                let department = if placed { choose(local) } else { None };
                let first_name: String = FirstName().fake();
                let last_name: String = LastName().fake();
                let email: String = SafeEmail().fake();

                Ok(StaffSeed {
                    user_id: None,
                    institution_id: institution.id,
                    faculty_id: department.map(|d| d.faculty_id),
                    department_id: department.map(|d| d.id),
                    first_name: cipher.seal(&first_name)?,
                    last_name: cipher.seal(&last_name)?,
                    email: cipher.seal(&email)?,
                    phone: cipher.seal(&phone_number())?,
                    employee_id: format!("EMP-{}-{}-{:04}", tag, inst_idx + 1, idx + 1),
                    position: pick(StaffPosition::ALL),
                    qualification: pick(Qualification::ALL),
                    specialization: cipher.seal(pick(SPECIALIZATIONS))?,
                    date_joined: random_date_in(year - (1..25).fake::<i32>()),
                    is_active: Boolean(90).fake(),
                })
            })
        })
        .collect()
}

/// Vacancies always name a department, and take its faculty.
pub fn generate_vacancies(
    institutions: &[InstitutionSeed],
    departments: &[DepartmentSeed],
    per_institution: usize,
) -> Vec<VacancySeed> {
    let by_institution = departments_by_institution(departments);
    let today = Utc::now().date_naive();

    institutions
        .par_iter()
        .flat_map_iter(|institution| {
            let local = by_institution
                .get(&institution.id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            (0..per_institution).filter_map(move |_| {
                let department = choose(local)?;
                let subject = department
                    .name
                    .strip_prefix("Department of ")
                    .unwrap_or(&department.name);
                let position = pick(&[
                    StaffPosition::Lecturer,
                    StaffPosition::Lecturer,
                    StaffPosition::Assistant,
                    StaffPosition::Professor,
                ]);

                Some(VacancySeed {
                    institution_id: institution.id,
                    title: format!("{} in {}", position.label(), subject),
                    faculty_id: department.faculty_id,
                    department_id: department.id,
                    quantity: (1..4).fake(),
                    deadline: today + Duration::days((7..90).fake::<i64>()),
                    description: Sentence(6..12).fake(),
                    status: pick(&[VacancyStatus::Open, VacancyStatus::Open, VacancyStatus::Closed]),
                })
            })
        })
        .collect()
}

pub async fn insert_staff(
    tx: &mut Transaction<'_, Postgres>,
    staff: &[StaffSeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} staff...", staff.len());

    let mut inserted = 0;
    for chunk in staff.chunks(BATCH_SIZE) {
        let sql = format!(
            "INSERT INTO staff (user_id, institution_id, faculty_id, department_id, first_name, last_name, \
             email, phone, employee_id, position, qualification, specialization, date_joined, \
             is_active) VALUES {}",
            values_clause(chunk.len(), 14)
        );
        let mut query = sqlx::query(&sql);
        for member in chunk {
            query = query
                .bind(member.user_id)
                .bind(member.institution_id)
                .bind(member.faculty_id)
                .bind(member.department_id)
                .bind(&member.first_name)
                .bind(&member.last_name)
                .bind(&member.email)
                .bind(&member.phone)
                .bind(&member.employee_id)
                .bind(member.position)
                .bind(member.qualification)
                .bind(&member.specialization)
                .bind(member.date_joined)
                .bind(member.is_active);
        }
        inserted += query.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} staff in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

pub async fn insert_vacancies(
    tx: &mut Transaction<'_, Postgres>,
    vacancies: &[VacancySeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("📌 Seeding {} vacancies...", vacancies.len());

    let mut inserted = 0;
    for chunk in vacancies.chunks(BATCH_SIZE) {
        let sql = format!(
            "INSERT INTO vacancies (institution_id, title, faculty_id, department_id, quantity, \
             deadline, description, status) VALUES {}",
            values_clause(chunk.len(), 8)
        );
        let mut query = sqlx::query(&sql);
        for vacancy in chunk {
            query = query
                .bind(vacancy.institution_id)
                .bind(&vacancy.title)
                .bind(vacancy.faculty_id)
                .bind(vacancy.department_id)
                .bind(vacancy.quantity)
                .bind(vacancy.deadline)
                .bind(&vacancy.description)
                .bind(vacancy.status);
        }
        inserted += query.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} vacancies in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::academics::{generate_departments, generate_faculties};
    use crate::seeder::institutions::generate_institutions;
    use std::collections::HashSet;

    fn setup() -> (Vec<InstitutionSeed>, Vec<DepartmentSeed>) {
        let institutions = generate_institutions(3, "STF001");
        let faculties = generate_faculties(&institutions, 2);
        let departments = generate_departments(&faculties, 3);
        (institutions, departments)
    }

    #[test]
    fn staff_placement_stays_within_institution() {
        let cipher = FieldCipher::new(&[5u8; 32]);
        let (institutions, departments) = setup();
        let staff = generate_staff(&cipher, &institutions, &departments, 40, "STF001")
            .expect("sealing succeeds");
        assert_eq!(staff.len(), 120);

        let placement: HashMap<_, _> = departments
            .iter()
            .map(|d| (d.id, (d.faculty_id, d.institution_id)))
            .collect();
        for member in &staff {
            assert_eq!(member.faculty_id.is_some(), member.department_id.is_some());
            if let Some(department_id) = member.department_id {
                assert_eq!(
                    placement.get(&department_id),
                    member
                        .faculty_id
                        .map(|faculty_id| (faculty_id, member.institution_id))
                        .as_ref()
                );
            }
        }

        let ids: HashSet<_> = staff.iter().map(|s| s.employee_id.as_str()).collect();
        assert_eq!(ids.len(), staff.len());
        assert!(staff.iter().all(|s| s.employee_id.len() <= 50));
    }

    #[test]
    fn staff_email_is_sealed() {
        let cipher = FieldCipher::new(&[5u8; 32]);
        let (institutions, departments) = setup();
        let staff = generate_staff(&cipher, &institutions, &departments, 2, "STF001")
            .expect("sealing succeeds");
        for member in &staff {
            let email = cipher.open(&member.email).expect("opens");
            assert!(email.contains('@'));
            assert_ne!(member.email, email.as_bytes());
        }
    }

    #[test]
    fn vacancies_reference_a_local_department() {
        let (institutions, departments) = setup();
        let vacancies = generate_vacancies(&institutions, &departments, 4);
        assert_eq!(vacancies.len(), 12);

        let today = Utc::now().date_naive();
        let placement: HashMap<_, _> = departments
            .iter()
            .map(|d| (d.id, (d.faculty_id, d.institution_id)))
            .collect();
        for vacancy in &vacancies {
            assert_eq!(
                placement.get(&vacancy.department_id),
                Some(&(vacancy.faculty_id, vacancy.institution_id))
            );
            assert!(vacancy.deadline > today);
            assert!(vacancy.quantity >= 1);
        }
    }

    #[test]
    fn no_departments_means_no_vacancies() {
        let institutions = generate_institutions(2, "STF002");
        assert!(generate_vacancies(&institutions, &[], 3).is_empty());
    }
}
