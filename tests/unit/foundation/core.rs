use super::*;

#[test]
fn cell_rect_contains_is_half_open() {
    let r = CellRect {
        x: 100,
        y: 300,
        size: 100,
    };
    assert!(r.contains(100, 300));
    assert!(r.contains(199, 399));
    assert!(!r.contains(200, 350));
    assert!(!r.contains(99, 350));
    assert_eq!(r.to_rect(), Rect::new(100.0, 300.0, 200.0, 400.0));
}

#[test]
fn vec3_scale_and_length() {
    let v = Vec3::new(3.0, 4.0, 0.0).scale(2.0);
    assert_eq!(v, Vec3::new(6.0, 8.0, 0.0));
    assert!((v.length() - 10.0).abs() < 1e-12);
}

#[test]
fn unpremultiply_recovers_opaque_and_half_alpha() {
    let opaque = Rgba8Premul {
        r: 255,
        g: 10,
        b: 0,
        a: 255,
    };
    assert_eq!(opaque.to_straight_rgba(), [255, 10, 0, 255]);

    let half = Rgba8Premul {
        r: 64,
        g: 64,
        b: 64,
        a: 128,
    };
    let [r, g, b, a] = half.to_straight_rgba();
    assert_eq!(a, 128);
    assert!(r >= 127 && r <= 128);
    assert_eq!(r, g);
    assert_eq!(g, b);

    assert_eq!(Rgba8Premul::transparent().to_straight_rgba(), [0, 0, 0, 0]);
}

#[test]
fn pixel_from_short_slice_is_rejected() {
    assert!(Rgba8Premul::from_slice(&[1, 2, 3]).is_err());
    let px = Rgba8Premul::from_slice(&[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(px.a, 4);
}
