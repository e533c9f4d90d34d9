/// `1 - (1 - t)^3`, without clamping.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
