use budget_core::{BudgetEstimate, PlannerError, PlannerResult};

/// Convert a target volume and CPM into a total budget paced evenly over
/// `flight_days`. No rounding happens here.
pub fn project(target_impressions: u64, cpm: f64, flight_days: u32) -> PlannerResult<BudgetEstimate> {
    if target_impressions == 0 {
        return Err(PlannerError::InvalidInput(
            "target impressions must be greater than zero".to_string(),
        ));
    }
    if flight_days == 0 {
        return Err(PlannerError::InvalidInput(
            "flight length must be at least one day".to_string(),
        ));
    }
    if !cpm.is_finite() || cpm < 0.0 {
        return Err(PlannerError::InvalidInput(format!("CPM must be a finite, non-negative value, got {cpm}")));
    }

    let target = target_impressions as f64;
    let days = f64::from(flight_days);
    let total_budget = target / 1000.0 * cpm;

    Ok(BudgetEstimate {
        total_budget,
        daily_budget: total_budget / days,
        daily_impressions: target / days,
    })
}
