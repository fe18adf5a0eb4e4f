use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn sphere_projection_axes() {
    let p = SphereProjection::default();

    let north = p.project(90.0, 0.0);
    assert!(close(north.y, 500.0));
    assert!(close(north.x, 0.0) && close(north.z, 0.0));

    // lat 0, lon 0: theta = π, so the point is on -X.
    let origin = p.project(0.0, 0.0);
    assert!(close(origin.x, -500.0));
    assert!(close(origin.y, 0.0));
    assert!(close(origin.z, 0.0));

    let east = p.project(0.0, 90.0);
    assert!(close(east.z, 500.0));

    for (lat, lon) in [(12.5, -40.0), (-70.0, 170.0), (45.0, 45.0)] {
        assert!(close(p.project(lat, lon).length(), 500.0));
    }
}

#[test]
fn tilt_constants() {
    let north = Tilt::new(45.0, 0.0);
    assert!(close(north.multiplier, FRAC_PI_2 * 0.5));
    assert_eq!(north.direction, -1.0);

    let equator = Tilt::new(0.0, 0.0);
    assert_eq!(equator.direction, 1.0);
    assert!(close(equator.multiplier, FRAC_PI_2));

    assert!(close(Tilt::new(-90.0, 0.0).multiplier, 0.0));
}

#[test]
fn billboard_roll() {
    let cam = Vec3::new(0.0, 0.0, 1000.0);

    let pose = Tilt::new(0.0, 90.0).pose(cam, 0.0);
    assert_eq!(pose.target, cam);
    assert!(close(pose.base_roll, FRAC_PI_2));
    // sin(π/2) · π/2 · 1 · -1
    assert!(close(pose.tilt_roll, -FRAC_PI_2));
    assert!(close(pose.roll(), 0.0));

    let pose = Tilt::new(30.0, 0.0).pose(cam, FRAC_PI_2);
    assert!(close(pose.base_roll, -FRAC_PI_2));
    assert!(close(pose.tilt_roll, FRAC_PI_2 * (2.0 / 3.0)));

    // At the poles the tilt vanishes.
    let pose = Tilt::new(90.0, 10.0).pose(cam, 1.3);
    assert!(close(pose.tilt_roll, 0.0));
}
