// File: crates/chart-core/src/grid.rs
// Summary: Tick layout helpers (nice-number steps, tick positions, labels).

/// Upper bound on ticks per axis; layouts past it are dropped.
pub const MAX_TICKS: usize = 1_000;

/// Round `raw` to a "nice" step: 1, 2, 2.5 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let exp = raw.log10().floor();
    let base = 10f64.powf(exp);
    // subnormal raw: the decade underflows to zero
    if base == 0.0 || !base.is_finite() {
        return raw;
    }
    let frac = raw / base;
    let nice = if frac <= 1.0 {
        1.0
    } else if frac <= 2.0 {
        2.0
    } else if frac <= 2.5 {
        2.5
    } else if frac <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Tick positions inside `[min, max]` with at most roughly `target` intervals.
pub fn ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max <= min || target == 0 {
        return Vec::new();
    }
    let step = nice_step((max - min) / target as f64);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let first = (min / step).ceil();
    let last = (max / step).floor();
    // indices must stay exact in f64 and the count bounded
    if !(first.abs() < 2f64.powi(53) && last.abs() < 2f64.powi(53)) || last - first > MAX_TICKS as f64 {
        return Vec::new();
    }
    (first as i64..=last as i64).map(|i| i as f64 * step).collect()
}

/// Format a tick value with just enough decimals for `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    if !step.is_finite() || step <= 0.0 {
        return format!("{value}");
    }
    let exp = step.log10().floor();
    let base = 10f64.powf(exp);
    // 2.5 x 10^k needs one more digit than its decade (0.25, 2.5)
    let half = i32::from(((step / base) - 2.5).abs() < 1e-9);
    let decimals = (half - exp as i32).max(0) as usize;
    format!("{:.*}", decimals, value)
}
