use crate::domain::model::{
    ModuleConfig, ModuleContribution, PeriodResult, PricingModel, ProjectionResult,
    ScenarioParams, Summary,
};
use crate::utils::error::{Result, RoiError};
use crate::utils::validation::{validate_finite, validate_range};

/// Upper bound on the projection loop; also the CLI/TOML input limit.
pub const MAX_HORIZON_PERIODS: i64 = 600;

#[derive(Debug, Clone, Copy, Default)]
struct PeriodTotals {
    cost_before: f64,
    cost_after: f64,
    vendor_price: f64,
    time_saved_minutes: f64,
}

/// Projects before/after automation costs over `1..=horizon_periods`.
///
/// Every figure at period `t` is a running total since the start (scaled by
/// `t`), not a period-over-period delta. Divisions by a zero wage or a zero
/// before-cost fall back to `0`.
pub fn project(params: &ScenarioParams) -> Result<ProjectionResult> {
    validate_params(params)?;

    let mut rows = Vec::with_capacity(params.horizon_periods as usize);
    let mut cumulative_savings = 0.0;

    for t in 1..=params.horizon_periods {
        let totals = period_totals(params, t as f64);
        let savings = totals.cost_before - totals.cost_after;
        cumulative_savings += savings;

        rows.push(PeriodResult {
            period_index: t,
            cost_before: totals.cost_before,
            cost_after: totals.cost_after,
            savings,
            cumulative_savings,
            percent_savings: safe_ratio(savings, totals.cost_before) * 100.0,
            vendor_price: totals.vendor_price,
            time_saved_minutes: totals.time_saved_minutes,
        });
    }

    let summary = summarize(rows.last(), params.hourly_wage);

    tracing::debug!(
        "Projected {} periods across {} enabled modules: savings {:.2}, ROI {:.1}%",
        rows.len(),
        params.modules.iter().filter(|m| m.enabled).count(),
        summary.total_savings,
        summary.roi_percent
    );

    Ok(ProjectionResult { rows, summary })
}

/// Per-module split of period `t`. Platform fee is not attributed to any module.
pub fn module_breakdown(params: &ScenarioParams, t: i64) -> Result<Vec<ModuleContribution>> {
    validate_params(params)?;
    if t < 1 || t > params.horizon_periods {
        return Err(RoiError::invalid(
            "period_index",
            t,
            format!("Period must be between 1 and {}", params.horizon_periods),
        ));
    }

    let breakdown = params
        .modules
        .iter()
        .filter(|m| m.enabled)
        .map(|m| {
            let cost_before = module_cost_before(m, params, t as f64);
            let cost_after = module_cost_after(m, params, t as f64);
            ModuleContribution {
                name: m.name.clone(),
                cost_before,
                cost_after,
                savings: cost_before - cost_after,
            }
        })
        .collect();

    Ok(breakdown)
}

fn validate_params(params: &ScenarioParams) -> Result<()> {
    validate_range("horizon_periods", params.horizon_periods, 0, MAX_HORIZON_PERIODS)?;
    validate_finite("patients_per_period", params.patients_per_period)?;
    validate_finite("hourly_wage", params.hourly_wage)?;
    validate_finite("platform_fee_per_period", params.platform_fee_per_period)?;

    for (idx, module) in params.modules.iter().enumerate() {
        validate_finite(&format!("modules[{}].minutes_before", idx), module.minutes_before)?;
        validate_finite(&format!("modules[{}].minutes_after", idx), module.minutes_after)?;
        validate_finite(&format!("modules[{}].unit_price", idx), module.unit_price)?;
    }

    Ok(())
}

fn period_totals(params: &ScenarioParams, t: f64) -> PeriodTotals {
    let modules = params
        .modules
        .iter()
        .filter(|m| m.enabled)
        .fold(PeriodTotals::default(), |acc, m| PeriodTotals {
            cost_before: acc.cost_before + module_cost_before(m, params, t),
            cost_after: acc.cost_after + module_cost_after(m, params, t),
            vendor_price: acc.vendor_price + m.unit_price * params.patients_per_period * t,
            time_saved_minutes: acc.time_saved_minutes
                + module_minutes_saved(m) * params.patients_per_period * t,
        });

    // 平台費只計入自動化後的成本
    let fee = params.platform_fee_per_period * t;
    PeriodTotals {
        cost_after: modules.cost_after + fee,
        vendor_price: modules.vendor_price + fee,
        ..modules
    }
}

/// Flat-price modules take over the whole task; residual-time modules leave
/// `minutes_after` of staff work per patient.
fn module_minutes_saved(module: &ModuleConfig) -> f64 {
    match module.pricing_model {
        PricingModel::FlatPrice => module.minutes_before,
        PricingModel::ResidualTimePlusPrice => module.minutes_before - module.minutes_after,
    }
}

fn module_cost_before(module: &ModuleConfig, params: &ScenarioParams, t: f64) -> f64 {
    module.minutes_before / 60.0 * params.patients_per_period * params.hourly_wage * t
}

fn module_cost_after(module: &ModuleConfig, params: &ScenarioParams, t: f64) -> f64 {
    let per_patient = match module.pricing_model {
        PricingModel::FlatPrice => module.unit_price,
        PricingModel::ResidualTimePlusPrice => {
            module.unit_price + module.minutes_after / 60.0 * params.hourly_wage
        }
    };
    per_patient * params.patients_per_period * t
}

fn summarize(last: Option<&PeriodResult>, hourly_wage: f64) -> Summary {
    match last {
        Some(row) => Summary {
            time_saved_hours: safe_ratio(row.savings, hourly_wage),
            total_savings: row.savings,
            roi_percent: row.percent_savings,
            cost_before: row.cost_before,
            cost_after: row.cost_after,
            vendor_price: row.vendor_price,
            time_saved_minutes: row.time_saved_minutes,
        },
        None => Summary::default(),
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
