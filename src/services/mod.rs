//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach repositories and transactions through
//! the Unit of Work.

mod auth_service;
pub mod container;
mod evaluation_service;
mod risk_service;
mod rubric_service;
mod software_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use evaluation_service::{EvaluationManager, EvaluationService};
pub use risk_service::{RiskManager, RiskService};
pub use rubric_service::{RubricManager, RubricService};
pub use software_service::{SoftwareManager, SoftwareService};
pub use user_service::{UserManager, UserService};

// Parallel execution utilities
pub use container::parallel;

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
