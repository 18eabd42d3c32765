//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Each store has a transaction-scoped counterpart used through the
//! Unit of Work.

pub(crate) mod entities;
mod evaluation_repository;
mod risk_repository;
mod rubric_repository;
mod software_repository;
mod user_repository;

pub use evaluation_repository::{EvaluationRepository, EvaluationStore, TxEvaluationRepository};
pub use risk_repository::{RiskRepository, RiskStore, TxRiskRepository};
pub use rubric_repository::{RubricRepository, RubricStore, TxRubricRepository};
pub use software_repository::{SoftwareRepository, SoftwareStore, TxSoftwareRepository};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use evaluation_repository::MockEvaluationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use risk_repository::MockRiskRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use rubric_repository::MockRubricRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use software_repository::MockSoftwareRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
