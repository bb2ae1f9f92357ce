use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
    assert_eq!(mul_div255_u16(100, 128), 50);
}

#[test]
fn hsv_primaries() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
    let (r, g, b) = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
    assert!(r.abs() < 1e-9 && (g - 1.0).abs() < 1e-9 && b.abs() < 1e-9);
    let (r, g, b) = hsv_to_rgb(2.0 / 3.0, 1.0, 1.0);
    assert!(r.abs() < 1e-9 && g.abs() < 1e-9 && (b - 1.0).abs() < 1e-9);
}

#[test]
fn hsv_hue_wraps_and_value_scales() {
    assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
    assert_eq!(hsv_to_rgb(0.3, 0.0, 0.5), (0.5, 0.5, 0.5));
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
}
