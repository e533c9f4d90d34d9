use super::*;

#[test]
fn mul_div255_identity_and_zero() {
    assert_eq!(mul_div255_u16(200, 255), 200);
    assert_eq!(mul_div255_u16(200, 0), 0);
}
