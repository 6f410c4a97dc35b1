pub use campusdesk_models::faculties::*;
