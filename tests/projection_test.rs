use roi_calc::{module_breakdown, project, recapture, ModuleConfig, RoiError, ScenarioParams};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn multi_module_scenario() -> ScenarioParams {
    ScenarioParams {
        patients_per_period: 350.0,
        hourly_wage: 28.0,
        horizon_periods: 24,
        platform_fee_per_period: 750.0,
        modules: vec![
            ModuleConfig::flat_price("fax", 12.0, 1.5),
            ModuleConfig::residual_time("benefit_check", 20.0, 4.0, 3.0),
            ModuleConfig::with_efficiency("prior_auth", 45.0, 80.0, 6.5),
            ModuleConfig::flat_price("order_entry", 8.0, 1.0).disabled(),
        ],
    }
}

#[test]
fn test_prior_auth_calculator_year_one() {
    // 每週 17 位病人、一年 52 週、平台費每年 5000
    let params = ScenarioParams {
        patients_per_period: 17.0 * 52.0,
        hourly_wage: 22.0,
        horizon_periods: 3,
        platform_fee_per_period: 5_000.0,
        modules: vec![ModuleConfig::with_efficiency("prior_auth", 60.0, 90.0, 6.5)],
    };

    let result = project(&params).unwrap();
    let year_one = &result.rows[0];

    assert_close(year_one.cost_before, 19_448.0);
    assert_close(year_one.cost_after, 12_690.8);
    assert_close(year_one.savings, 6_757.2);
    // 6.5 * 884 + 5000
    assert_close(year_one.vendor_price, 10_746.0);
    // 884 * 60 * 0.9
    assert_close(year_one.time_saved_minutes, 47_736.0);

    let year_three = &result.rows[2];
    assert_close(year_three.cost_before, 3.0 * 19_448.0);
    assert_close(year_three.savings, 3.0 * 6_757.2);
    assert_close(result.summary.total_savings, year_three.savings);
    assert_close(result.summary.vendor_price, 3.0 * 10_746.0);
    assert_close(result.summary.time_saved_minutes, 3.0 * 47_736.0);
}

#[test]
fn test_row_count_and_ordering_for_many_horizons() {
    for horizon in [0_i64, 1, 5, 12, 60] {
        let params = ScenarioParams {
            horizon_periods: horizon,
            ..multi_module_scenario()
        };
        let result = project(&params).unwrap();

        assert_eq!(result.rows.len(), horizon as usize);
        let indices: Vec<i64> = result.rows.iter().map(|r| r.period_index).collect();
        let expected: Vec<i64> = (1..=horizon).collect();
        assert_eq!(indices, expected);
    }
}

#[test]
fn test_all_disabled_modules_charge_only_platform_fee() {
    let mut params = multi_module_scenario();
    params.modules = params.modules.into_iter().map(ModuleConfig::disabled).collect();

    let result = project(&params).unwrap();
    for row in &result.rows {
        assert_eq!(row.cost_before, 0.0);
        assert_close(row.cost_after, 750.0 * row.period_index as f64);
        assert_eq!(row.percent_savings, 0.0);
    }
}

#[test]
fn test_platform_fee_only_touches_after_cost() {
    let without_fee = ScenarioParams {
        platform_fee_per_period: 0.0,
        ..multi_module_scenario()
    };
    let with_fee = multi_module_scenario();

    let a = project(&without_fee).unwrap();
    let b = project(&with_fee).unwrap();

    for (x, y) in a.rows.iter().zip(&b.rows) {
        assert_close(x.cost_before, y.cost_before);
        assert_close(y.cost_after - x.cost_after, 750.0 * x.period_index as f64);
    }
}

#[test]
fn test_breakdown_matches_every_row() {
    let params = multi_module_scenario();
    let result = project(&params).unwrap();

    for row in &result.rows {
        let breakdown = module_breakdown(&params, row.period_index).unwrap();
        assert_eq!(breakdown.len(), 3);

        let before: f64 = breakdown.iter().map(|c| c.cost_before).sum();
        let after: f64 = breakdown.iter().map(|c| c.cost_after).sum();
        assert_close(before, row.cost_before);
        assert_close(after + 750.0 * row.period_index as f64, row.cost_after);
    }
}

#[test]
fn test_zero_wage_summary_has_no_time_saved() {
    let params = ScenarioParams {
        hourly_wage: 0.0,
        ..multi_module_scenario()
    };

    let result = project(&params).unwrap();
    assert_eq!(result.summary.time_saved_hours, 0.0);
    assert!(result.rows.iter().all(|r| r.percent_savings == 0.0));
}

#[test]
fn test_negative_horizon_is_invalid_configuration() {
    let params = ScenarioParams {
        horizon_periods: -12,
        ..multi_module_scenario()
    };

    let err = project(&params).unwrap_err();
    assert!(matches!(err, RoiError::InvalidConfiguration { .. }));
    assert!(err.is_configuration_error());
}

#[test]
fn test_projection_is_deterministic_across_threads() {
    let params = multi_module_scenario();
    let expected = project(&params).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let params = params.clone();
            std::thread::spawn(move || project(&params).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_recapture_is_independent_of_projection() {
    let points = recapture(200.0, 12.0, 80_000.0, &[5.0, 10.0, 15.0]).unwrap();

    assert_eq!(points.len(), 3);
    assert_close(points[0].recaptured_revenue, 9_600_000.0);
    assert_close(points[1].recaptured_revenue, 19_200_000.0);
    assert_close(points[2].recaptured_revenue, 28_800_000.0);
}
