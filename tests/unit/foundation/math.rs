use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(255, 0), 0);
    assert_eq!(mul_div255(128, 255), 128);
    assert_eq!(mul_div255(255, 128), 128);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = [200, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [0, 0, 0, 0]);
}

#[test]
fn unpremultiply_restores_opaque_and_half_alpha() {
    let mut px = [10, 20, 30, 255, 64, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[128, 64, 0, 128]);
}
