// File: crates/accrual-chart/src/simulate.rs
// Summary: Adaptive-curve borrow rate simulator producing the runs document.
//
// A market accrues interest on its total borrow at a rate that follows utilization
// along a kinked curve around a target, while the rate at target itself drifts
// exponentially with the utilization error. The same market is accrued once per
// `period` over a fixed duration for several periods and compared against single
// accruals ("Full Duration") to show how accrual frequency changes the outcome.

use log::{debug, info};

use crate::document::{Document, Runs, Sample, Scalar};
use crate::error::{ChartError, Result};

/// Seconds in a 365-day year.
pub const YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;
/// Seconds in a week.
pub const WEEK: u64 = 7 * 24 * 60 * 60;

pub const BASE_RUN_NAME: &str = "Full Duration";

/// Stored magnitudes are `borrow * SAMPLE_SCALE`.
const SAMPLE_SCALE: f64 = 1e7;

/// Longest simulated duration whose length in seconds fits a `u64`.
pub const MAX_WEEKS: u64 = u64::MAX / WEEK;

/// `n` weeks in seconds, `None` past [`MAX_WEEKS`].
pub const fn weeks(n: u64) -> Option<u64> {
    WEEK.checked_mul(n)
}

/// Interest rate model constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveParams {
    /// Drift speed of the rate at target per unit of error, per second.
    pub adjustment_speed: f64,
    /// Rate multiplier at full utilization (and its inverse at zero).
    pub curve_steepness: f64,
    pub target_utilization: f64,
    /// Rate at target used when a market starts from zero, per second.
    pub initial_rate_at_target: f64,
}

impl CurveParams {
    /// `initial_rate` is the yearly rate at target (2.0 = 200%).
    pub fn new(initial_rate: f64) -> Self {
        Self {
            adjustment_speed: 50.0 / YEAR,
            curve_steepness: 4.0,
            target_utilization: 0.9,
            initial_rate_at_target: initial_rate / YEAR,
        }
    }

    /// Piecewise-linear multiplier: 1/steepness at err = -1, 1 at 0, steepness at 1.
    pub fn curve(&self, err: f64) -> f64 {
        let slope = (self.curve_steepness - 1.0) / if err > 0.0 { 1.0 } else { self.curve_steepness };
        slope * err + 1.0
    }

    pub fn rate(&self, rate_at_target: f64, err: f64) -> f64 {
        rate_at_target * self.curve(err)
    }

    /// Normalized distance of `utilization` from the target, in [-1, 1].
    pub fn error(&self, utilization: f64) -> f64 {
        let u_target = self.target_utilization;
        let norm = if utilization > u_target { 1.0 - u_target } else { u_target };
        (utilization - u_target) / norm
    }

    /// Average borrow rate over `elapsed` seconds and the rate at target at its end.
    pub fn borrow_rate(&self, utilization: f64, start_rate_at_target: f64, elapsed: f64) -> (f64, f64) {
        let err = self.error(utilization);
        if start_rate_at_target == 0.0 {
            let r0 = self.initial_rate_at_target;
            return (self.rate(r0, err), r0);
        }
        let linear_adaptation = self.adjustment_speed * err * elapsed;
        let end_rate_at_target = start_rate_at_target * linear_adaptation.exp();
        let end_borrow_rate = self.rate(end_rate_at_target, err);
        if linear_adaptation == 0.0 {
            return (end_borrow_rate, end_rate_at_target);
        }
        // mean of an exponential between the two endpoints
        let start_borrow_rate = self.rate(start_rate_at_target, err);
        ((end_borrow_rate - start_borrow_rate) / linear_adaptation, end_rate_at_target)
    }
}

/// Continuously compounded interest on `principal` at `rate` over `period` seconds.
pub fn interest(principal: f64, rate: f64, period: f64) -> f64 {
    principal * (rate * period).exp_m1()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Market {
    pub borrow: f64,
    pub supply: f64,
    pub rate_at_target: f64,
    pub time: u64,
    /// `(time, total borrow)` after each accrual, starting at `(0, initial borrow)`.
    pub history: Vec<(u64, f64)>,
}

impl Market {
    pub fn new(borrow: f64, supply: f64, rate_at_target: f64) -> Self {
        Self { borrow, supply, rate_at_target, time: 0, history: vec![(0, borrow)] }
    }

    pub fn utilization(&self) -> f64 {
        self.borrow / self.supply
    }

    /// Accrue `elapsed` seconds of interest and update the rate at target.
    pub fn accrue(&mut self, curve: &CurveParams, elapsed: u64) {
        let elapsed_f = elapsed as f64;
        let (avg_rate, end_rate_at_target) = curve.borrow_rate(self.utilization(), self.rate_at_target, elapsed_f);
        self.rate_at_target = end_rate_at_target;
        let accrued = interest(self.borrow, avg_rate, elapsed_f);
        self.borrow += accrued;
        self.supply += accrued;
        self.time += elapsed;
        self.history.push((self.time, self.borrow));
    }
}

/// Simulation inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    pub duration_weeks: u64,
    /// Yearly rate at target at time 0 (2.0 = 200%).
    pub initial_rate: f64,
    pub initial_borrow: f64,
    pub initial_supply: f64,
    /// `(run name, accrual period in seconds)`.
    pub periods: Vec<(String, u64)>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            duration_weeks: 10,
            initial_rate: 2.0,
            initial_borrow: 0.900_000_057_077_627_38,
            initial_supply: 1.000_000_057_077_627_38,
            periods: vec![
                ("Every 1M seconds".to_owned(), 1_000_000),
                ("Every 600k seconds".to_owned(), 600_000),
                ("Every 200k seconds".to_owned(), 200_000),
                ("Every 20k seconds".to_owned(), 20_000),
            ],
        }
    }
}

impl SimulationParams {
    /// Simulated duration in seconds. Zero weeks and durations past [`MAX_WEEKS`] are rejected.
    pub fn duration(&self) -> Result<u64> {
        let invalid = ChartError::Duration { weeks: self.duration_weeks, max: MAX_WEEKS };
        if self.duration_weeks == 0 {
            return Err(invalid);
        }
        weeks(self.duration_weeks).ok_or(invalid)
    }

    pub fn curve(&self) -> CurveParams {
        CurveParams::new(self.initial_rate)
    }

    fn fresh_market(&self) -> Market {
        Market::new(self.initial_borrow, self.initial_supply, self.curve().initial_rate_at_target)
    }

    /// Accrue a fresh market every `period` seconds over `duration` (rounded down to whole periods).
    pub fn run_step(&self, duration: u64, period: u64) -> Market {
        let curve = self.curve();
        let mut market = self.fresh_market();
        if period == 0 {
            return market;
        }
        for _ in 0..duration / period {
            market.accrue(&curve, period);
        }
        debug!("B0,{duration},{period} | borrow {}", market.borrow);
        market
    }

    /// Borrow history of single accruals over 1, 2, .. `duration_weeks` weeks.
    ///
    /// One point per week after `(0, initial_borrow)`; week 1 is recorded once.
    pub fn base_run(&self) -> Result<Vec<(u64, f64)>> {
        self.duration()?;
        let mut history = vec![(0, self.initial_borrow)];
        for i in 1..=self.duration_weeks {
            // i <= duration_weeks, checked above
            let span = WEEK * i;
            let market = self.run_step(span, span);
            history.push((market.time, market.borrow));
        }
        Ok(history)
    }
}

fn to_samples(history: &[(u64, f64)]) -> Vec<Sample> {
    history
        .iter()
        .map(|&(time, borrow)| Sample::new(time, format!("{:.5}", borrow * SAMPLE_SCALE)))
        .collect()
}

/// Percentage of the base run's borrow increase reached by `borrow`.
pub fn growth_ratio(initial_borrow: f64, borrow: f64, base_borrow: f64) -> f64 {
    (borrow - initial_borrow) * 100.0 / (base_borrow - initial_borrow)
}

/// Run every configured period plus the base run and assemble the document.
pub fn simulate(params: &SimulationParams) -> Result<Document> {
    let duration = params.duration()?;
    let mut runs = Runs::new();

    let base = params.base_run()?;
    let base_borrow = base.last().map(|&(_, b)| b).unwrap_or(params.initial_borrow);
    runs.insert(BASE_RUN_NAME, to_samples(&base));

    for (name, period) in &params.periods {
        let market = params.run_step(duration, *period);
        let ratio = growth_ratio(params.initial_borrow, market.borrow, base_borrow);
        if ratio.is_finite() {
            info!("{name}Δ/fullΔ {ratio:.6} %");
        } else {
            info!("{name}: base run did not grow, no ratio");
        }
        runs.insert(name.clone(), to_samples(&market.history));
    }

    Ok(Document {
        initial_rate: Scalar::Text(format!("{}%", params.initial_rate * 100.0)),
        base_run_name: BASE_RUN_NAME.to_owned(),
        runs,
    })
}
