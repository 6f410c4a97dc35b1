pub mod facilities;
pub mod faculties;
pub mod fees;
pub mod institutions;
pub mod payments;
pub mod permissions;
pub mod staff;
pub mod students;
pub mod vacancies;
