pub use campusdesk_models::students::*;
