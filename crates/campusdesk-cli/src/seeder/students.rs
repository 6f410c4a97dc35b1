//! Student and payment seeding.
//!
//! Personal columns are sealed while the rows are generated, so the plain
//! values never leave the generator.

use campusdesk_crypto::{CryptoError, FieldCipher};
use campusdesk_models::{DropoutReason, FinalGrade, StudentId, StudentStatus};
use chrono::{NaiveDate, Utc};
use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use std::time::Instant;

use super::academics::programs_by_institution;
use super::models::{BATCH_SIZE, InstitutionSeed, PaymentSeed, ProgramSeed, StudentSeed};
use super::{choose, current_year, pick, random_date_in, values_clause};

const STATUSES: &[StudentStatus] = &[
    StudentStatus::Active,
    StudentStatus::Active,
    StudentStatus::Active,
    StudentStatus::Active,
    StudentStatus::Attachment,
    StudentStatus::Graduated,
    StudentStatus::Suspended,
    StudentStatus::Deferred,
    StudentStatus::Dropout,
];

const GENDERS: &[&str] = &["Male", "Female"];
const DISABILITIES: &[&str] = &["None", "None", "None", "None", "Visual", "Hearing", "Physical"];
const WORK_AREAS: &[&str] = &["Library", "Grounds", "Kitchen", "Administration", "Laboratory"];
const ID_LETTERS: &[char] = &['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N'];

/// Zimbabwean national id shape, e.g. `63-123456A27`.
fn national_id() -> String {
    format!(
        "{:02}-{:06}{}{:02}",
        (1..90).fake::<u32>(),
        (100_000..1_000_000).fake::<u32>(),
        pick(ID_LETTERS),
        (10..100).fake::<u32>()
    )
}

/// Generates students for every institution that has at least one program.
/// Each student is enrolled in a program of their own institution.
pub fn generate_students(
    cipher: &FieldCipher,
    institutions: &[InstitutionSeed],
    programs: &[ProgramSeed],
    per_institution: usize,
    tag: &str,
) -> Result<Vec<StudentSeed>, CryptoError> {
    let by_institution = programs_by_institution(programs);
    let year = current_year();

    institutions
        .par_iter()
        .enumerate()
        .flat_map_iter(|(inst_idx, institution)| {
            let offered = by_institution
                .get(&institution.id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            (0..per_institution).filter_map(move |idx| {
                let program = choose(offered)?;
                let student_id = format!("{}-{}-{:05}", tag, inst_idx + 1, idx + 1);
                Some(generate_student(cipher, institution, program, student_id, year))
            })
        })
        .collect()
}

fn generate_student(
    cipher: &FieldCipher,
    institution: &InstitutionSeed,
    program: &ProgramSeed,
    student_id: String,
    year: i32,
) -> Result<StudentSeed, CryptoError> {
    let status = pick(STATUSES);
    let enrollment_year = match status {
        StudentStatus::Graduated => year - program.duration_years - (0..3).fake::<i32>(),
        _ => year - (0..program.duration_years).fake::<i32>(),
    };
    let (graduation_year, final_grade) = match status {
        StudentStatus::Graduated => (
            Some(enrollment_year + program.duration_years),
            Some(pick(FinalGrade::ALL)),
        ),
        _ => (None, None),
    };
    let dropout_reason = match status {
        StudentStatus::Dropout => Some(pick(DropoutReason::ALL)),
        _ => None,
    };

    let is_work_for_fees: bool = Boolean(15).fake();
    let (work_area, hours_pledged) = if is_work_for_fees {
        (Some(pick(WORK_AREAS).to_string()), (20..120).fake())
    } else {
        (None, 0)
    };

    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let has_national_id: bool = Boolean(85).fake();

    Ok(StudentSeed {
        id: StudentId::new(),
        user_id: None,
        student_id,
        first_name: cipher.seal(&first_name)?,
        last_name: cipher.seal(&last_name)?,
        national_id: if has_national_id {
            Some(cipher.seal(&national_id())?)
        } else {
            None
        },
        gender: cipher.seal(pick(GENDERS))?,
        disability_type: cipher.seal(pick(DISABILITIES))?,
        date_of_birth: Some(random_date_in(enrollment_year - (18..26).fake::<i32>())),
        enrollment_year,
        status,
        dropout_reason,
        institution_id: institution.id,
        program_id: program.id,
        is_iseop: Boolean(5).fake(),
        is_work_for_fees,
        work_area,
        hours_pledged,
        graduation_year,
        final_grade,
    })
}

/// Generates payments dated between enrolment and today.
pub fn generate_payments(students: &[StudentSeed], per_student: usize) -> Vec<PaymentSeed> {
    let today = Utc::now().date_naive();
    let year = current_year();

    students
        .par_iter()
        .flat_map_iter(|student| {
            (0..per_student).map(move |_| {
                let paid_year = (student.enrollment_year.min(year)..year + 1).fake::<i32>();
                let date_paid: NaiveDate = random_date_in(paid_year).min(today);

                PaymentSeed {
                    student_id: student.id,
                    amount: Decimal::new((5_000..50_000).fake::<i64>(), 2),
                    date_paid,
                    reference: format!("RCPT-{}", (100_000..1_000_000).fake::<u32>()),
                }
            })
        })
        .collect()
}

pub async fn insert_students(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("👨‍🎓 Seeding {} students...", students.len());

    let mut inserted = 0;
    for chunk in students.chunks(BATCH_SIZE) {
        inserted += insert_students_chunk(tx, chunk).await?;
    }

    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> anyhow::Result<u64> {
    let sql = format!(
        "INSERT INTO students (id, user_id, student_id, first_name, last_name, national_id, gender, \
         disability_type, date_of_birth, enrollment_year, status, dropout_reason, \
         institution_id, program_id, is_iseop, is_work_for_fees, work_area, hours_pledged, \
         graduation_year, final_grade) VALUES {}",
        values_clause(students.len(), 20)
    );

    let mut query = sqlx::query(&sql);
    for student in students {
        query = query
            .bind(student.id)
            .bind(student.user_id)
            .bind(&student.student_id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.national_id)
            .bind(&student.gender)
            .bind(&student.disability_type)
            .bind(student.date_of_birth)
            .bind(student.enrollment_year)
            .bind(student.status)
            .bind(student.dropout_reason)
            .bind(student.institution_id)
            .bind(student.program_id)
            .bind(student.is_iseop)
            .bind(student.is_work_for_fees)
            .bind(&student.work_area)
            .bind(student.hours_pledged)
            .bind(student.graduation_year)
            .bind(student.final_grade);
    }

    Ok(query.execute(&mut **tx).await?.rows_affected())
}

pub async fn insert_payments(
    tx: &mut Transaction<'_, Postgres>,
    payments: &[PaymentSeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🧾 Seeding {} payments...", payments.len());

    let mut inserted = 0;
    for chunk in payments.chunks(BATCH_SIZE) {
        let sql = format!(
            "INSERT INTO payments (student_id, amount, date_paid, reference) VALUES {}",
            values_clause(chunk.len(), 4)
        );
        let mut query = sqlx::query(&sql);
        for payment in chunk {
            query = query
                .bind(payment.student_id)
                .bind(payment.amount)
                .bind(payment.date_paid)
                .bind(&payment.reference);
        }
        inserted += query.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} payments in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::academics::{generate_departments, generate_faculties, generate_programs};
    use crate::seeder::institutions::generate_institutions;
    use std::collections::{HashMap, HashSet};

    fn cipher() -> FieldCipher {
        FieldCipher::new(&[3u8; 32])
    }

    fn hierarchy(institutions: usize) -> (Vec<InstitutionSeed>, Vec<ProgramSeed>) {
        let institutions = generate_institutions(institutions, "STU001");
        let faculties = generate_faculties(&institutions, 2);
        let departments = generate_departments(&faculties, 2);
        let programs = generate_programs(&departments, 2, "STU001");
        (institutions, programs)
    }

    #[test]
    fn national_id_has_expected_shape() {
        let id = national_id();
        assert_eq!(id.len(), 12);
        assert_eq!(&id[2..3], "-");
    }

    #[test]
    fn students_are_enrolled_in_their_own_institution() {
        let cipher = cipher();
        let (institutions, programs) = hierarchy(3);
        let students = generate_students(&cipher, &institutions, &programs, 30, "STU001")
            .expect("sealing succeeds");
        assert_eq!(students.len(), 90);

        let program_institution: HashMap<_, _> =
            programs.iter().map(|p| (p.id, p.institution_id)).collect();
        for student in &students {
            assert_eq!(
                program_institution.get(&student.program_id),
                Some(&student.institution_id)
            );
        }

        let numbers: HashSet<_> = students.iter().map(|s| s.student_id.as_str()).collect();
        assert_eq!(numbers.len(), students.len());
    }

    #[test]
    fn student_outcome_fields_follow_status() {
        let cipher = cipher();
        let (institutions, programs) = hierarchy(2);
        let students = generate_students(&cipher, &institutions, &programs, 100, "STU001")
            .expect("sealing succeeds");

        for student in &students {
            assert_eq!(
                student.graduation_year.is_some(),
                student.status == StudentStatus::Graduated
            );
            assert_eq!(
                student.final_grade.is_some(),
                student.status == StudentStatus::Graduated
            );
            assert_eq!(
                student.dropout_reason.is_some(),
                student.status == StudentStatus::Dropout
            );
            assert_eq!(student.work_area.is_some(), student.is_work_for_fees);
            assert!(student.hours_pledged >= 0);
        }
    }

    #[test]
    fn personal_columns_are_sealed() {
        let cipher = cipher();
        let (institutions, programs) = hierarchy(1);
        let students = generate_students(&cipher, &institutions, &programs, 5, "STU001")
            .expect("sealing succeeds");

        for student in &students {
            let gender = cipher.open(&student.gender).expect("opens");
            assert!(GENDERS.contains(&gender.as_str()));
            let first_name = cipher.open(&student.first_name).expect("opens");
            assert!(!first_name.is_empty());
            assert_ne!(student.first_name, first_name.as_bytes());
        }
    }

    #[test]
    fn institutions_without_programs_get_no_students() {
        let cipher = cipher();
        let institutions = generate_institutions(2, "STU002");
        let students =
            generate_students(&cipher, &institutions, &[], 10, "STU002").expect("no sealing");
        assert!(students.is_empty());
    }

    #[test]
    fn payments_are_positive_and_not_in_the_future() {
        let cipher = cipher();
        let (institutions, programs) = hierarchy(1);
        let students = generate_students(&cipher, &institutions, &programs, 10, "STU001")
            .expect("sealing succeeds");
        let payments = generate_payments(&students, 3);
        let today = Utc::now().date_naive();

        assert_eq!(payments.len(), 30);
        for payment in &payments {
            assert!(payment.amount > Decimal::ZERO);
            assert!(payment.date_paid <= today);
        }
    }
}
