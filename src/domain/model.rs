use serde::{Deserialize, Serialize};

/// 自動化後的成本模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    /// `unit_price * patients * t`
    #[default]
    FlatPrice,
    /// `(unit_price + minutes_after / 60 * hourly_wage) * patients * t`
    ResidualTimePlusPrice,
}

/// A single toggleable automation module (fax processing, benefit check,
/// prior authorization, order entry, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub name: String,
    pub enabled: bool,
    pub minutes_before: f64,
    pub minutes_after: f64,
    pub unit_price: f64,
    pub pricing_model: PricingModel,
}

impl ModuleConfig {
    pub fn flat_price(name: impl Into<String>, minutes_before: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            minutes_before,
            minutes_after: 0.0,
            unit_price,
            pricing_model: PricingModel::FlatPrice,
        }
    }

    pub fn residual_time(
        name: impl Into<String>,
        minutes_before: f64,
        minutes_after: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            minutes_before,
            minutes_after,
            unit_price,
            pricing_model: PricingModel::ResidualTimePlusPrice,
        }
    }

    /// Residual-time module described by the share of staff time it removes.
    /// `efficiency_pct = 90` leaves 10% of `minutes_before` as residual work.
    pub fn with_efficiency(
        name: impl Into<String>,
        minutes_before: f64,
        efficiency_pct: f64,
        unit_price: f64,
    ) -> Self {
        let minutes_after = minutes_before * (1.0 - efficiency_pct / 100.0);
        Self::residual_time(name, minutes_before, minutes_after, unit_price)
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub patients_per_period: f64,
    pub hourly_wage: f64,
    pub horizon_periods: i64,
    #[serde(default)]
    pub platform_fee_per_period: f64,
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodResult {
    pub period_index: i64,
    pub cost_before: f64,
    pub cost_after: f64,
    pub savings: f64,
    pub cumulative_savings: f64,
    pub percent_savings: f64,
    /// 廠商收費: 各模組單價 + 平台費
    pub vendor_price: f64,
    pub time_saved_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub time_saved_hours: f64,
    pub total_savings: f64,
    pub roi_percent: f64,
    pub cost_before: f64,
    pub cost_after: f64,
    pub vendor_price: f64,
    pub time_saved_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub rows: Vec<PeriodResult>,
    pub summary: Summary,
}

impl ProjectionResult {
    pub fn final_row(&self) -> Option<&PeriodResult> {
        self.rows.last()
    }
}

/// Per-module share of a single period's totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleContribution {
    pub name: String,
    pub cost_before: f64,
    pub cost_after: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecapturePoint {
    pub improvement_point: f64,
    pub recaptured_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecaptureParams {
    pub patients_per_period: f64,
    pub periods_per_year: f64,
    pub revenue_per_patient: f64,
    pub improvement_points: Vec<f64>,
}
