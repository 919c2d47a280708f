//! Domain types and DTOs
//!
//! The estimate types define the one external contract; the rest is fixed
//! demo content served to the front end.

pub mod dashboard;
pub mod estimate;
pub mod pricing;
pub mod users;

pub use dashboard::Dashboard;
pub use estimate::EstimateForm;
