use gallery_wasm::eyes::{pupil_offset, pupil_transform, EyeField, EYE_SPACING};
use gallery_wasm::sim;

#[test]
fn pupil_points_at_the_pointer() {
    let (dx, dy) = pupil_offset((100.0, 100.0), (200.0, 100.0), 5.0);
    assert!((dx - 5.0).abs() < 1e-12 && dy.abs() < 1e-12);

    let (dx, dy) = pupil_offset((0.0, 0.0), (0.0, -40.0), 8.0);
    assert!(dx.abs() < 1e-12 && (dy + 8.0).abs() < 1e-12);

    let (dx, dy) = pupil_offset((10.0, 10.0), (13.0, 14.0), 5.0);
    assert!((dx - 3.0).abs() < 1e-12 && (dy - 4.0).abs() < 1e-12);
}

#[test]
fn pupil_transform_is_css() {
    assert_eq!(pupil_transform((3.0, -4.5)), "translate(3.00px, -4.50px)");
}

#[test]
fn field_skips_some_cells_and_jitters_within_range() {
    let mut rng = sim::rng(42);
    let field = EyeField::generate(1200.0, 600.0, &mut rng);
    let capacity = EyeField::capacity(1200.0, 600.0);
    assert_eq!(capacity, 200);
    assert!(field.len() < capacity);
    // roughly 70% of the grid survives
    assert!(field.len() > capacity / 2);

    for &(x, y) in field.positions() {
        let gx = ((x - 10.0) / EYE_SPACING).round();
        let gy = ((y - 10.0) / EYE_SPACING).round();
        assert!((x - (gx * EYE_SPACING + 10.0)).abs() <= 10.0);
        assert!((y - (gy * EYE_SPACING + 10.0)).abs() <= 10.0);
    }
}

#[test]
fn empty_viewport_has_no_eyes() {
    let mut rng = sim::rng(1);
    assert!(EyeField::generate(0.0, 800.0, &mut rng).is_empty());
}
