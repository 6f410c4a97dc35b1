//! # Campusdesk CLI
//!
//! Administrative tools for a Campusdesk database: applying migrations,
//! seeding fake institutions with their students and staff, and clearing
//! seeded data again.

pub mod seeder;
