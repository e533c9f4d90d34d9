pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linearly map `x` from `input` to `output`, holding the output endpoints outside `input`.
///
/// `input` must be ascending. A zero-width input range acts as a step at `input[0]`.
pub fn interp_clamped(x: f64, input: [f64; 2], output: [f64; 2]) -> f64 {
    let [x0, x1] = input;
    let [y0, y1] = output;
    let span = x1 - x0;
    if span.abs() <= f64::EPSILON {
        return if x < x0 { y0 } else { y1 };
    }
    lerp(y0, y1, ((x - x0) / span).clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
