pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::core::projection::MAX_HORIZON_PERIODS;
#[cfg(feature = "cli")]
use crate::core::ScenarioSource;
#[cfg(feature = "cli")]
use crate::domain::model::{ModuleConfig, RecaptureParams, ScenarioParams};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_range, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Single-module calculator driven entirely by flags.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "roi-calc")]
#[command(about = "Estimate cost savings and ROI of workflow automation")]
pub struct CliConfig {
    #[arg(long, default_value = "200")]
    pub patients_per_period: f64,

    #[arg(long, default_value = "22")]
    pub hourly_wage: f64,

    #[arg(long, default_value = "36", allow_hyphen_values = true)]
    pub horizon: i64,

    #[arg(long, default_value = "0")]
    pub platform_fee: f64,

    #[arg(long, default_value = "fax")]
    pub module_name: String,

    #[arg(long, default_value = "15")]
    pub minutes_before: f64,

    /// Residual staff minutes per patient; switches to the residual-time pricing model
    #[arg(long)]
    pub minutes_after: Option<f64>,

    /// Percent of staff time removed; takes precedence over --minutes-after
    #[arg(long)]
    pub efficiency: Option<f64>,

    #[arg(long, default_value = "2")]
    pub unit_price: f64,

    #[arg(long, default_value = "month")]
    pub period_label: String,

    /// Enables the revenue recapture table
    #[arg(long)]
    pub revenue_per_patient: Option<f64>,

    #[arg(long, default_value = "12")]
    pub periods_per_year: f64,

    #[arg(long, value_delimiter = ',', default_value = "5,10,15")]
    pub improvement: Vec<f64>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Directory for the report file; prints to stdout when omitted
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn module(&self) -> ModuleConfig {
        match (self.efficiency, self.minutes_after) {
            (Some(efficiency), _) => ModuleConfig::with_efficiency(
                self.module_name.clone(),
                self.minutes_before,
                efficiency,
                self.unit_price,
            ),
            (None, Some(minutes_after)) => ModuleConfig::residual_time(
                self.module_name.clone(),
                self.minutes_before,
                minutes_after,
                self.unit_price,
            ),
            (None, None) => ModuleConfig::flat_price(
                self.module_name.clone(),
                self.minutes_before,
                self.unit_price,
            ),
        }
    }
}

#[cfg(feature = "cli")]
impl ScenarioSource for CliConfig {
    fn scenario(&self) -> Result<ScenarioParams> {
        Ok(ScenarioParams {
            patients_per_period: self.patients_per_period,
            hourly_wage: self.hourly_wage,
            horizon_periods: self.horizon,
            platform_fee_per_period: self.platform_fee,
            modules: vec![self.module()],
        })
    }

    fn recapture(&self) -> Option<RecaptureParams> {
        self.revenue_per_patient.map(|revenue_per_patient| RecaptureParams {
            patients_per_period: self.patients_per_period,
            periods_per_year: self.periods_per_year,
            revenue_per_patient,
            improvement_points: self.improvement.clone(),
        })
    }

    fn period_label(&self) -> &str {
        &self.period_label
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_range("patients_per_period", self.patients_per_period, 0.0, 50_000.0)?;
        validate_range("hourly_wage", self.hourly_wage, 0.0, 100.0)?;
        validate_range("horizon", self.horizon, 0, MAX_HORIZON_PERIODS)?;
        validate_range("platform_fee", self.platform_fee, 0.0, 50_000.0)?;
        validate_range("minutes_before", self.minutes_before, 0.0, 100.0)?;
        validate_range("unit_price", self.unit_price, 0.0, 1_000.0)?;

        if let Some(minutes_after) = self.minutes_after {
            validate_range("minutes_after", minutes_after, 0.0, 100.0)?;
        }
        if let Some(efficiency) = self.efficiency {
            validate_range("efficiency", efficiency, 0.0, 100.0)?;
        }
        if let Some(revenue) = self.revenue_per_patient {
            validate_range("revenue_per_patient", revenue, 0.0, 10_000_000.0)?;
            validate_range("periods_per_year", self.periods_per_year, 0.0, 366.0)?;
        }
        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
        }

        Ok(())
    }
}
