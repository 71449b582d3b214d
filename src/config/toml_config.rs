use crate::app::report::OutputFormat;
use crate::core::projection::MAX_HORIZON_PERIODS;
use crate::core::ScenarioSource;
use crate::domain::model::{ModuleConfig, PricingModel, RecaptureParams, ScenarioParams};
use crate::utils::error::{Result, RoiError};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_path, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub scenario: ScenarioSection,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
    pub recapture: Option<RecaptureSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSection {
    pub name: String,
    pub description: Option<String>,
    pub period_label: Option<String>,
    pub patients_per_period: f64,
    pub hourly_wage: f64,
    pub horizon_periods: i64,
    pub platform_fee_per_period: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    pub enabled: Option<bool>,
    pub minutes_before: f64,
    pub minutes_after: Option<f64>,
    pub efficiency: Option<f64>,
    pub unit_price: f64,
    pub pricing_model: Option<PricingModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecaptureSection {
    pub patients_per_period: Option<f64>,
    pub periods_per_year: f64,
    pub revenue_per_patient: f64,
    pub improvement_points: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

impl ModuleEntry {
    /// `efficiency` 優先於 `minutes_after`，並強制使用殘餘工時模型
    pub fn to_module(&self) -> ModuleConfig {
        let module = match self.efficiency {
            Some(efficiency) => ModuleConfig::with_efficiency(
                self.name.clone(),
                self.minutes_before,
                efficiency,
                self.unit_price,
            ),
            None => ModuleConfig {
                name: self.name.clone(),
                enabled: true,
                minutes_before: self.minutes_before,
                minutes_after: self.minutes_after.unwrap_or(0.0),
                unit_price: self.unit_price,
                pricing_model: self.pricing_model.unwrap_or_default(),
            },
        };

        if self.enabled.unwrap_or(true) {
            module
        } else {
            module.disabled()
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RoiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOURLY_WAGE})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        let scenario = &self.scenario;
        validate_non_empty_string("scenario.name", &scenario.name)?;
        validate_range(
            "scenario.horizon_periods",
            scenario.horizon_periods,
            0,
            MAX_HORIZON_PERIODS,
        )?;
        validate_finite("scenario.patients_per_period", scenario.patients_per_period)?;
        validate_finite("scenario.hourly_wage", scenario.hourly_wage)?;
        if let Some(fee) = scenario.platform_fee_per_period {
            validate_finite("scenario.platform_fee_per_period", fee)?;
        }

        for (idx, module) in self.modules.iter().enumerate() {
            validate_non_empty_string(&format!("modules[{}].name", idx), &module.name)?;
            if let Some(efficiency) = module.efficiency {
                validate_range(&format!("modules[{}].efficiency", idx), efficiency, 0.0, 100.0)?;
                if module.pricing_model == Some(PricingModel::FlatPrice) {
                    return Err(RoiError::invalid(
                        &format!("modules[{}].pricing_model", idx),
                        "flat_price",
                        "efficiency requires the residual_time_plus_price model",
                    ));
                }
                if let Some(minutes_after) = module.minutes_after {
                    return Err(RoiError::invalid(
                        &format!("modules[{}].minutes_after", idx),
                        minutes_after,
                        "set either efficiency or minutes_after, not both",
                    ));
                }
            }
        }

        if let Some(recapture) = &self.recapture {
            for point in &recapture.improvement_points {
                validate_range("recapture.improvement_points", *point, 0.0, 100.0)?;
            }
        }

        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_deref()) {
            validate_path("output.path", path)?;
        }

        Ok(())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn enabled_module_names(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|m| m.enabled.unwrap_or(true))
            .map(|m| m.name.as_str())
            .collect()
    }
}

impl ScenarioSource for TomlConfig {
    fn scenario(&self) -> Result<ScenarioParams> {
        Ok(ScenarioParams {
            patients_per_period: self.scenario.patients_per_period,
            hourly_wage: self.scenario.hourly_wage,
            horizon_periods: self.scenario.horizon_periods,
            platform_fee_per_period: self.scenario.platform_fee_per_period.unwrap_or(0.0),
            modules: self.modules.iter().map(ModuleEntry::to_module).collect(),
        })
    }

    fn recapture(&self) -> Option<RecaptureParams> {
        self.recapture.as_ref().map(|r| RecaptureParams {
            patients_per_period: r
                .patients_per_period
                .unwrap_or(self.scenario.patients_per_period),
            periods_per_year: r.periods_per_year,
            revenue_per_patient: r.revenue_per_patient,
            improvement_points: r.improvement_points.clone(),
        })
    }

    fn period_label(&self) -> &str {
        self.scenario.period_label.as_deref().unwrap_or("period")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
