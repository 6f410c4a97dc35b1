//! Mirrored user accounts for seeded students and staff.
//!
//! Real accounts come from the identity provider. Seeded ones use a
//! reserved domain so `clear` can remove them without touching real users.

use campusdesk_models::UserId;
use fake::Fake;
use fake::faker::boolean::en::Boolean;
use sqlx::{Postgres, Transaction};
use std::time::Instant;

use super::models::{BATCH_SIZE, StaffSeed, StudentSeed, UserSeed};
use super::values_clause;

pub const SEED_EMAIL_DOMAIN: &str = "seed.campusdesk.test";

/// Share of students and staff that get a linked account.
const LINKED_PERCENT: u8 = 25;

fn account(local_part: &str) -> UserSeed {
    UserSeed {
        id: UserId::new(),
        email: format!("{}@{}", local_part.to_lowercase(), SEED_EMAIL_DOMAIN),
    }
}

/// Links a random share of students and staff to fresh accounts and returns
/// the accounts to insert. Local parts come from the registration and
/// employee numbers, which are already unique.
pub fn link_users(students: &mut [StudentSeed], staff: &mut [StaffSeed]) -> Vec<UserSeed> {
    let mut users = Vec::new();

    for student in students.iter_mut() {
        if Boolean(LINKED_PERCENT).fake() {
            let user = account(&format!("student.{}", student.student_id));
            student.user_id = Some(user.id);
            users.push(user);
        }
    }
    for member in staff.iter_mut() {
        if Boolean(LINKED_PERCENT).fake() {
            let user = account(&format!("staff.{}", member.employee_id));
            member.user_id = Some(user.id);
            users.push(user);
        }
    }

    users
}

pub async fn insert_users(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("👤 Seeding {} linked accounts...", users.len());

    let mut inserted = 0;
    for chunk in users.chunks(BATCH_SIZE) {
        let sql = format!(
            "INSERT INTO users (id, email) VALUES {}",
            values_clause(chunk.len(), 2)
        );
        let mut query = sqlx::query(&sql);
        for user in chunk {
            query = query.bind(user.id).bind(&user.email);
        }
        inserted += query.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} accounts in {:?}",
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
    use crate::seeder::staff::generate_staff;
    use crate::seeder::students::generate_students;
    use campusdesk_crypto::FieldCipher;
    use std::collections::HashSet;

    #[test]
    fn linked_accounts_are_unique_and_reserved() {
        let cipher = FieldCipher::new(&[9u8; 32]);
        let institutions = generate_institutions(2, "USR001");
        let faculties = generate_faculties(&institutions, 2);
        let departments = generate_departments(&faculties, 2);
        let programs = generate_programs(&departments, 2, "USR001");
        let mut students =
            generate_students(&cipher, &institutions, &programs, 60, "USR001").expect("seals");
        let mut staff =
            generate_staff(&cipher, &institutions, &departments, 30, "USR001").expect("seals");
        assert!(students.iter().all(|s| s.user_id.is_none()));

        let users = link_users(&mut students, &mut staff);

        let linked: Vec<UserId> = students
            .iter()
            .filter_map(|s| s.user_id)
            .chain(staff.iter().filter_map(|s| s.user_id))
            .collect();
        assert_eq!(linked.len(), users.len());

        let ids: HashSet<_> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, linked.into_iter().collect());

        let emails: HashSet<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), users.len());
        assert!(users.iter().all(|u| u.email.ends_with(SEED_EMAIL_DOMAIN)));
        assert!(users.iter().all(|u| u.email.len() <= 254));
    }
}
