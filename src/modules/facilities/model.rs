pub use campusdesk_models::facilities::*;
