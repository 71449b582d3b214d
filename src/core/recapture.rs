use crate::domain::model::{RecaptureParams, RecapturePoint};
use crate::utils::error::Result;
use crate::utils::validation::{validate_finite, validate_range};

/// Revenue recovered by lowering the claim denial rate by each improvement
/// point (percentage points, `0..=100`). Output keeps the input order.
pub fn recapture(
    patients_per_period: f64,
    periods_per_year: f64,
    revenue_per_patient: f64,
    improvement_points: &[f64],
) -> Result<Vec<RecapturePoint>> {
    validate_finite("patients_per_period", patients_per_period)?;
    validate_finite("periods_per_year", periods_per_year)?;
    validate_finite("revenue_per_patient", revenue_per_patient)?;

    let annual_revenue = patients_per_period * periods_per_year * revenue_per_patient;

    improvement_points
        .iter()
        .map(|&point| {
            validate_range("improvement_points", point, 0.0, 100.0)?;
            Ok(RecapturePoint {
                improvement_point: point,
                recaptured_revenue: annual_revenue * (point / 100.0),
            })
        })
        .collect()
}

pub fn recapture_from(params: &RecaptureParams) -> Result<Vec<RecapturePoint>> {
    recapture(
        params.patients_per_period,
        params.periods_per_year,
        params.revenue_per_patient,
        &params.improvement_points,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recapture_ten_points() {
        let points = recapture(200.0, 12.0, 80_000.0, &[10.0]).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].improvement_point, 10.0);
        assert!((points[0].recaptured_revenue - 19_200_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_recapture_preserves_order() {
        let points = recapture(100.0, 12.0, 1_000.0, &[15.0, 0.0, 5.0]).unwrap();
        let improvements: Vec<f64> = points.iter().map(|p| p.improvement_point).collect();
        assert_eq!(improvements, vec![15.0, 0.0, 5.0]);
        assert_eq!(points[1].recaptured_revenue, 0.0);
    }

    #[test]
    fn test_recapture_rejects_out_of_range_points() {
        assert!(recapture(100.0, 12.0, 1_000.0, &[101.0]).is_err());
        assert!(recapture(100.0, 12.0, 1_000.0, &[-1.0]).is_err());
        assert!(recapture(100.0, 12.0, 1_000.0, &[f64::NAN]).is_err());
    }

    #[test]
    fn test_recapture_empty_points() {
        assert!(recapture(100.0, 12.0, 1_000.0, &[]).unwrap().is_empty());
    }
}
