pub use campusdesk_models::institutions::*;
