//! Faculty, department, program and fee structure seeding.

use campusdesk_models::{DepartmentId, FacultyId, InstitutionId, ProgramId};
use fake::Fake;
use rayon::prelude::*;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use std::time::Instant;

use super::models::{BATCH_SIZE, DepartmentSeed, FacultySeed, InstitutionSeed, ProgramSeed};
use super::{pick, values_clause};

const FACULTIES: &[&str] = &[
    "Faculty of Engineering",
    "Faculty of Commerce",
    "Faculty of Applied Sciences",
    "Faculty of Education",
    "Faculty of Information Technology",
    "Faculty of Agriculture",
    "Faculty of Built Environment",
    "Faculty of Health Sciences",
];

const SUBJECTS: &[&str] = &[
    "Electrical Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
    "Accounting",
    "Marketing",
    "Computer Science",
    "Mathematics",
    "Early Childhood Development",
    "Agronomy",
    "Hospitality",
    "Automotive Engineering",
    "Food Science",
];

const AWARDS: &[&str] = &["National Certificate", "National Diploma", "Higher National Diploma"];

/// Uses the index to keep names unique within the parent.
fn numbered(names: &[&str], idx: usize, fallback: &str) -> String {
    match names.get(idx) {
        Some(name) => (*name).to_string(),
        None => format!("{} {}", fallback, idx + 1),
    }
}

pub fn generate_faculties(
    institutions: &[InstitutionSeed],
    per_institution: usize,
) -> Vec<FacultySeed> {
    institutions
        .par_iter()
        .flat_map(|institution| {
            (0..per_institution)
                .map(|idx| FacultySeed {
                    id: FacultyId::new(),
                    institution_id: institution.id,
                    name: numbered(FACULTIES, idx, "Faculty"),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn generate_departments(faculties: &[FacultySeed], per_faculty: usize) -> Vec<DepartmentSeed> {
    faculties
        .par_iter()
        .flat_map(|faculty| {
            (0..per_faculty)
                .map(|idx| DepartmentSeed {
                    id: DepartmentId::new(),
                    faculty_id: faculty.id,
                    institution_id: faculty.institution_id,
                    name: format!("Department of {}", numbered(SUBJECTS, idx, "Studies")),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Program codes are globally unique: run tag, department sequence and
/// program sequence.
pub fn generate_programs(
    departments: &[DepartmentSeed],
    per_department: usize,
    tag: &str,
) -> Vec<ProgramSeed> {
    departments
        .par_iter()
        .enumerate()
        .flat_map(|(dept_idx, department)| {
            let subject = department
                .name
                .strip_prefix("Department of ")
                .unwrap_or(&department.name);

            (0..per_department)
                .map(|idx| {
                    let award = AWARDS[idx % AWARDS.len()];
                    let name = if idx < AWARDS.len() {
                        format!("{} in {}", award, subject)
                    } else {
                        format!("{} in {} {}", award, subject, idx + 1)
                    };

                    ProgramSeed {
                        id: ProgramId::new(),
                        department_id: department.id,
                        institution_id: department.institution_id,
                        name,
                        code: format!("{}-{}-{}", tag, dept_idx + 1, idx + 1),
                        duration_years: pick(&[2, 3, 3, 4]),
                        semester_fee: Decimal::new((15_000..90_000).fake::<i64>(), 2),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Groups programs by institution, for placing students.
pub fn programs_by_institution(
    programs: &[ProgramSeed],
) -> HashMap<InstitutionId, Vec<&ProgramSeed>> {
    let mut grouped: HashMap<_, Vec<&ProgramSeed>> = HashMap::new();
    for program in programs {
        grouped
            .entry(program.institution_id)
            .or_default()
            .push(program);
    }
    grouped
}

pub async fn insert_faculties(
    tx: &mut Transaction<'_, Postgres>,
    faculties: &[FacultySeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🏛️  Seeding {} faculties...", faculties.len());

    let mut inserted = 0;
    for chunk in faculties.chunks(BATCH_SIZE) {
        let sql = format!(
            "INSERT INTO faculties (id, institution_id, name) VALUES {}",
            values_clause(chunk.len(), 3)
        );
        let mut query = sqlx::query(&sql);
        for faculty in chunk {
            query = query
                .bind(faculty.id)
                .bind(faculty.institution_id)
                .bind(&faculty.name);
        }
        inserted += query.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} faculties in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

pub async fn insert_departments(
    tx: &mut Transaction<'_, Postgres>,
    departments: &[DepartmentSeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("📂 Seeding {} departments...", departments.len());

    let mut inserted = 0;
    for chunk in departments.chunks(BATCH_SIZE) {
        let sql = format!(
            "INSERT INTO departments (id, faculty_id, name) VALUES {}",
            values_clause(chunk.len(), 3)
        );
        let mut query = sqlx::query(&sql);
        for department in chunk {
            query = query
                .bind(department.id)
                .bind(department.faculty_id)
                .bind(&department.name);
        }
        inserted += query.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} departments in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

pub async fn insert_programs(
    tx: &mut Transaction<'_, Postgres>,
    programs: &[ProgramSeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} programs...", programs.len());

    let mut inserted = 0;
    for chunk in programs.chunks(BATCH_SIZE) {
        let sql = format!(
            "INSERT INTO programs (id, department_id, name, code, duration_years) VALUES {}",
            values_clause(chunk.len(), 5)
        );
        let mut query = sqlx::query(&sql);
        for program in chunk {
            query = query
                .bind(program.id)
                .bind(program.department_id)
                .bind(&program.name)
                .bind(&program.code)
                .bind(program.duration_years);
        }
        inserted += query.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} programs in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

/// One fee structure per program.
pub async fn insert_fee_structures(
    tx: &mut Transaction<'_, Postgres>,
    programs: &[ProgramSeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("💵 Seeding {} fee structures...", programs.len());

    let mut inserted = 0;
    for chunk in programs.chunks(BATCH_SIZE) {
        let sql = format!(
            "INSERT INTO fee_structures (program_id, semester_fee) VALUES {}",
            values_clause(chunk.len(), 2)
        );
        let mut query = sqlx::query(&sql);
        for program in chunk {
            query = query.bind(program.id).bind(program.semester_fee);
        }
        inserted += query.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} fee structures in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::institutions::generate_institutions;
    use std::collections::HashSet;

    #[test]
    fn numbered_falls_back_past_the_table() {
        assert_eq!(numbered(&["A", "B"], 1, "X"), "B");
        assert_eq!(numbered(&["A", "B"], 2, "X"), "X 3");
    }

    #[test]
    fn hierarchy_keeps_names_unique_within_parent() {
        let institutions = generate_institutions(2, "TAG001");
        let faculties = generate_faculties(&institutions, 10);
        assert_eq!(faculties.len(), 20);
        let keys: HashSet<_> = faculties
            .iter()
            .map(|f| (f.institution_id, f.name.clone()))
            .collect();
        assert_eq!(keys.len(), 20);

        let departments = generate_departments(&faculties, 14);
        let keys: HashSet<_> = departments
            .iter()
            .map(|d| (d.faculty_id, d.name.clone()))
            .collect();
        assert_eq!(keys.len(), departments.len());

        let faculty_institution: HashMap<_, _> = faculties
            .iter()
            .map(|f| (f.id, f.institution_id))
            .collect();
        for department in &departments {
            assert_eq!(
                faculty_institution.get(&department.faculty_id),
                Some(&department.institution_id)
            );
        }
    }

    #[test]
    fn program_codes_are_unique_and_short() {
        let institutions = generate_institutions(3, "ABCDEF");
        let faculties = generate_faculties(&institutions, 3);
        let departments = generate_departments(&faculties, 4);
        let programs = generate_programs(&departments, 5, "ABCDEF");

        let codes: HashSet<_> = programs.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes.len(), programs.len());
        assert!(programs.iter().all(|p| p.code.len() <= 20));
        assert!(programs.iter().all(|p| p.semester_fee > Decimal::ZERO));
        assert!(programs.iter().all(|p| p.duration_years >= 1));

        let grouped = programs_by_institution(&programs);
        assert_eq!(grouped.len(), 3);
        assert!(grouped.values().all(|list| list.len() == 3 * 4 * 5));
    }
}
