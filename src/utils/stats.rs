pub fn mean(values: &[f64]) -> Option<f64> {
    let sum = values.iter().sum::<f64>();
    let count = values.len();

    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

/// Pearson correlation coefficient of two equal-length samples.
///
/// Returns `None` when the lengths differ, there are fewer than two points, or
/// either sample has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator > 0.0 && denominator.is_finite() {
        Some((cov / denominator).clamp(-1.0, 1.0))
    } else {
        None
    }
}
