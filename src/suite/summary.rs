/// Success rate in tenths of a percent, rounded half up. Zero tests rate 0.
#[must_use]
pub fn success_rate_x10(passed: usize, failed: usize) -> u64 {
    let total = passed.saturating_add(failed);
    if total == 0 {
        return 0;
    }
    let total = u128::try_from(total).unwrap_or(u128::MAX);
    let passed = u128::try_from(passed).unwrap_or(u128::MAX);
    let scaled = passed
        .saturating_mul(1_000)
        .saturating_add(total / 2)
        .checked_div(total)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// `100·passed/(passed+failed)` with one decimal, e.g. `90.9`.
#[must_use]
pub fn format_success_rate(passed: usize, failed: usize) -> String {
    let rate = success_rate_x10(passed, failed);
    format!("{}.{}", rate / 10, rate % 10)
}
