pub mod engine;
pub mod projection;
pub mod recapture;

pub use crate::domain::model::{
    ModuleConfig, PeriodResult, PricingModel, ProjectionResult, ScenarioParams, Summary,
};
pub use crate::domain::ports::{ReportSink, ScenarioSource};
pub use crate::utils::error::Result;
