//! Number formatting shared by the summary line and every heuristic

/// Round half away from zero to `places` decimals
///
/// Negative zero is normalized so `-0.004` never renders as `-0.00`.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `$1234.50` style monetary amount
pub fn money(value: f64) -> String {
    format!("${:.2}", round_to(value, 2))
}

/// Percentage with a fixed number of decimals, e.g. `83.3%`
pub fn percent(value: f64, places: u32) -> String {
    format!("{:.*}%", places as usize, round_to(value, places))
}

/// Signed percentage, e.g. `+12.50%` / `-3.00%`
pub fn signed_percent(value: f64, places: u32) -> String {
    format!("{:+.*}%", places as usize, round_to(value, places))
}

/// `1 order` / `3 orders`
pub fn count_of(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}
