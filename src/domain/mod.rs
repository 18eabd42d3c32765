//! Domain layer - Core business entities and logic
//!
//! Plain records returned to clients, request payloads with their validation
//! rules, and the value types shared by services. Nothing in here touches the
//! database.

pub mod evaluation;
pub mod password;
pub mod risk;
pub mod rubric;
pub mod software;
pub mod user;

pub use evaluation::{
    CharacteristicSummary, Evaluation, EvaluationDetail, EvaluationReport,
    NewCharacteristicSummary, NewEvaluation, NewEvaluationDetail,
};
pub use password::Password;
pub use risk::{
    Impact, Likelihood, NewRisk, NewRiskClassification, NewRiskControl, NewRiskEvaluation,
    NewRiskMitigation, NewRiskOwnership, ResponseType, RiskClassification, RiskControl,
    RiskEvaluation, RiskMitigation, RiskOwnership, RiskRecord, RiskType, SoftwareRisk,
};
pub use rubric::{
    Characteristic, CharacteristicTree, NewCharacteristic, NewSubcharacteristic, Subcharacteristic,
};
pub use software::{
    LatestEvaluation, NewParticipant, NewSoftware, Participant, Software, SoftwareRegistered,
    SoftwareResponse, SoftwareSummary,
};
pub use user::{User, UserResponse, UserRole};
