pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::report::{render, OutputFormat};
pub use config::cli::{LocalStorage, StdoutSink};
pub use config::toml_config::TomlConfig;
pub use crate::core::{
    engine::{RoiEngine, RunOutcome},
    projection::{module_breakdown, project},
    recapture::recapture,
};
pub use domain::model::{
    ModuleConfig, ModuleContribution, PeriodResult, PricingModel, ProjectionResult,
    RecaptureParams, RecapturePoint, ScenarioParams, Summary,
};
pub use utils::error::{Result, RoiError};
