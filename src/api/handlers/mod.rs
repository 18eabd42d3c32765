//! HTTP request handlers.

pub mod auth_handler;
pub mod evaluation_handler;
pub mod risk_handler;
pub mod rubric_handler;
pub mod software_handler;

pub use auth_handler::auth_routes;
pub use rubric_handler::rubric_routes;
pub use software_handler::software_routes;
