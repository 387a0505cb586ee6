use super::*;

#[test]
fn fnv_hash_is_incremental() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"kineo");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"ki");
    b.write_bytes(b"neo");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_matches_reference_vector() {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn fnv_distinguishes_inputs() {
    let mut a = Fnv1a64::new_default();
    a.write_u64(1);
    let mut b = Fnv1a64::new_default();
    b.write_u64(2);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
}
