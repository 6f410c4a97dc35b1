pub use campusdesk_models::staff::*;
