use super::*;

use crate::foundation::core::Rgba8Premul;

fn default_atlas() -> SpriteAtlas {
    generate_atlas(&AnimationConfig::default()).unwrap()
}

// A pixel 3.5px right of `frame`'s anchor, inside the core ring (radius 2..4).
fn ring_pixel(atlas: &SpriteAtlas, frame: u32) -> Rgba8Premul {
    let anchor = core_anchor(&atlas.layout(), FrameIndex(frame));
    atlas
        .pixel(anchor.x as u32 + 3, anchor.y as u32)
        .unwrap()
}

#[test]
fn default_atlas_is_500_by_1000() {
    let atlas = default_atlas();
    assert_eq!((atlas.width(), atlas.height()), (500, 1000));
    assert_eq!(atlas.data().len(), 500 * 1000 * 4);
    assert_eq!(atlas.total_frames(), 50);
}

#[test]
fn anchor_sits_left_of_cell_center() {
    let layout = AnimationConfig::default().layout().unwrap();
    assert_eq!(core_anchor(&layout, FrameIndex(0)), Point::new(25.0, 50.0));
    assert_eq!(core_anchor(&layout, FrameIndex(7)), Point::new(225.0, 150.0));
    assert_eq!(core_anchor(&layout, FrameIndex(49)), Point::new(425.0, 950.0));
}

#[test]
fn first_frame_is_only_the_black_disc() {
    let atlas = default_atlas();
    let center = atlas.pixel(25, 50).unwrap();
    assert_eq!((center.r, center.g, center.b, center.a), (0, 0, 0, 255));

    assert_eq!(atlas.pixel(2, 2).unwrap().a, 0);
    // Shield radius is still zero, so nothing at r=8.
    assert_eq!(atlas.pixel(33, 50).unwrap().a, 0);
}

#[test]
fn core_ring_is_drawn_over_the_disc() {
    let atlas = default_atlas();
    // Frame 10: col 0, row 2; anchor (25, 250).
    assert_eq!(
        core_anchor(&atlas.layout(), FrameIndex(10)),
        Point::new(25.0, 250.0)
    );
    let px = ring_pixel(&atlas, 10);
    assert!(px.r > 150, "{px:?}");
    assert!(px.g < 60, "{px:?}");
    assert!(px.b < 60, "{px:?}");
}

#[test]
fn core_ring_is_still_growing_before_wave_start() {
    let atlas = default_atlas();
    // Frame 5 draws the ring at radius 2.5; the probe pixel only catches its outer edge.
    let growing = ring_pixel(&atlas, 5);
    let full = ring_pixel(&atlas, 10);
    assert!(growing.a < full.a, "{growing:?} vs {full:?}");
}

#[test]
fn pulse_fades_with_distance() {
    let atlas = default_atlas();
    // Frame 16: col 1, row 3; anchor (125, 350). Wave 0 is at r~17.05 with alpha ~0.67.
    let px = atlas.pixel(141, 349).unwrap();
    assert!(px.a > 64, "{px:?}");
    assert!(px.a < 230, "{px:?}");
    assert_eq!(px.r, px.g);
    assert_eq!(px.g, px.b);
}

#[test]
fn generation_is_deterministic() {
    let mut generator = AtlasGenerator::new();
    let a = generator.generate(&AnimationConfig::default()).unwrap();
    // Second run reuses the cached context.
    let b = generator.generate(&AnimationConfig::default()).unwrap();
    assert_eq!(a.data(), b.data());
    assert_eq!(a.fingerprint(), default_atlas().fingerprint());
}

#[test]
fn wave_count_changes_the_pixels() {
    let eight = default_atlas();
    let four = generate_atlas(&AnimationConfig {
        num_waves: 4,
        ..AnimationConfig::default()
    })
    .unwrap();
    assert_eq!(four.timing().loop_start_frame, 29);
    assert_ne!(eight.fingerprint(), four.fingerprint());
}

#[test]
fn colors_flow_into_the_atlas() {
    let atlas = generate_atlas(&AnimationConfig {
        core_color: "#00ff00".parse().unwrap(),
        ..AnimationConfig::default()
    })
    .unwrap();
    let px = ring_pixel(&atlas, 10);
    assert!(px.g > 150, "{px:?}");
    assert!(px.r < 60, "{px:?}");
}

#[test]
fn invalid_config_draws_nothing() {
    let mut generator = AtlasGenerator::new();
    let err = generator
        .generate(&AnimationConfig {
            num_waves: 2,
            ..AnimationConfig::default()
        })
        .unwrap_err();
    assert!(err.is_config());
    assert!(generator.ctx.is_none());

    let err = check_config(&AnimationConfig {
        rows: 3,
        ..AnimationConfig::default()
    })
    .unwrap_err();
    assert!(err.is_config());
}

#[test]
fn smaller_cells_shrink_the_surface() {
    let atlas = generate_atlas(&AnimationConfig {
        total_frames: 40,
        rows: 4,
        frame_pixels: 64,
        ..AnimationConfig::default()
    })
    .unwrap();
    assert_eq!((atlas.width(), atlas.height()), (640, 256));
    assert_eq!(atlas.timing().wave_start_frame, 5);
}
