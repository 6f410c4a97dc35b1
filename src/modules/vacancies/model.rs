pub use campusdesk_models::vacancies::*;
