use super::*;

#[test]
fn endpoints_are_stable() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
}

#[test]
fn out_cubic_front_loads_progress() {
    assert_eq!(ease_out_cubic(0.5), 0.875);
    assert!(ease_out_cubic(0.2) > 0.2);
    let (a, b, c) = (ease_out_cubic(0.25), ease_out_cubic(0.5), ease_out_cubic(0.75));
    assert!(a < b && b < c);
}
