pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::{init_departments_router, init_faculties_router, init_programs_router};
