//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod evaluation;
pub mod evaluation_characteristic_summary;
pub mod evaluation_detail;
pub mod quality_characteristic;
pub mod risk_classification;
pub mod risk_control;
pub mod risk_evaluation;
pub mod risk_mitigation;
pub mod risk_ownership;
pub mod software;
pub mod software_participant;
pub mod software_risk;
pub mod subcharacteristic;
pub mod user;
