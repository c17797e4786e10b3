use super::*;

#[test]
fn extent_rounds_and_clamps() {
    assert_eq!(extent_to_px(99.6), 100);
    assert_eq!(extent_to_px(-3.0), 0);
    assert_eq!(extent_to_px(f64::NAN), 0);
    assert_eq!(extent_to_px(f64::INFINITY), 0);
}

#[test]
fn measured_size_from_rect_uses_extent() {
    let r = Rect::new(10.0, 20.0, 110.0, 220.0);
    assert_eq!(MeasuredSize::from_rect(r), MeasuredSize::new(100, 200));
}
