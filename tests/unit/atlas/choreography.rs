use super::*;
use crate::atlas::config::AnimationConfig;
use std::f64::consts::TAU;

fn timing() -> DerivedTiming {
    AnimationConfig::default().timing().unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn phases_follow_the_default_schedule() {
    let t = timing();
    let phase = |i: u32| shield_phase(FrameIndex(i), &t);
    for i in 0..6 {
        assert_eq!(phase(i), ShieldPhase::Static, "frame {i}");
    }
    assert_eq!(phase(6), ShieldPhase::Swirl);
    assert_eq!(phase(22), ShieldPhase::Swirl);
    assert_eq!(phase(23), ShieldPhase::Redistribute);
    assert_eq!(phase(39), ShieldPhase::Redistribute);
    for i in 40..45 {
        assert_eq!(phase(i), ShieldPhase::Settle, "frame {i}");
    }
    for i in 45..60 {
        assert_eq!(phase(i), ShieldPhase::Static, "frame {i}");
    }
}

#[test]
fn settle_ends_on_a_fractional_bound() {
    let t = AnimationConfig {
        num_waves: 4,
        ..AnimationConfig::default()
    }
    .timing()
    .unwrap();
    assert_eq!(t.loop_start_frame, 29);
    // Settle lasts (50 - 29) / 2 = 10.5 frames, so it ends between 39 and 40.
    let phase = |i: u32| shield_phase(FrameIndex(i), &t);
    assert_eq!(phase(28), ShieldPhase::Redistribute);
    for i in 29..=39 {
        assert_eq!(phase(i), ShieldPhase::Settle, "frame {i}");
    }
    for i in 40..50 {
        assert_eq!(phase(i), ShieldPhase::Static, "frame {i}");
    }
}

#[test]
fn core_ring_grows_then_holds() {
    let t = timing();
    let mut prev = -1.0;
    for i in 0..=t.wave_start_frame {
        let r = core_radius(FrameIndex(i), &t);
        assert!(r >= prev, "frame {i}: {r} < {prev}");
        prev = r;
    }
    assert_eq!(core_radius(FrameIndex(0), &t), 0.0);
    assert!(close(core_radius(FrameIndex(3), &t), 1.5));
    for i in t.wave_start_frame..t.total_frames {
        assert_eq!(core_radius(FrameIndex(i), &t), CORE_RADIUS);
    }
}

#[test]
fn shield_fades_in_with_the_core() {
    let t = timing();
    assert_eq!(frame_pose(FrameIndex(0), &t).shield_radius, 0.0);
    assert!(close(frame_pose(FrameIndex(3), &t).shield_radius, 4.0));
    assert_eq!(frame_pose(FrameIndex(30), &t).shield_radius, SHIELD_RADIUS);
}

#[test]
fn static_arcs_sit_in_their_quadrants_without_touching() {
    let t = timing();
    let pose = frame_pose(FrameIndex(2), &t);
    for (n, arc) in pose.shield.iter().enumerate() {
        let q = n as f64 * std::f64::consts::FRAC_PI_2;
        assert!(close(arc.start, q + SHIELD_BASE + SHIELD_BUFFER));
        assert!(close(arc.sweep(), std::f64::consts::FRAC_PI_2 - 3.0 * SHIELD_BUFFER));
    }
    // Gap between consecutive arcs is positive.
    for n in 0..3 {
        assert!(pose.shield[n + 1].start > pose.shield[n].end);
    }
}

#[test]
fn swirl_never_swings_an_arc_backwards() {
    let t = timing();
    for i in t.wave_start_frame..t.swirl_done_frame {
        let pose = frame_pose(FrameIndex(i), &t);
        assert_eq!(pose.phase, ShieldPhase::Swirl);
        for (n, arc) in pose.shield.iter().enumerate() {
            let rest = n as f64 * std::f64::consts::FRAC_PI_2 + SHIELD_BASE;
            assert!(arc.start >= rest - 1e-12, "frame {i} arc {n}");
            assert!(close(
                arc.end - arc.start,
                std::f64::consts::FRAC_PI_2 - 2.0 * SHIELD_BUFFER
            ));
        }
    }
}

#[test]
fn swirl_starts_with_only_the_first_arc_moving() {
    let t = timing();
    let pose = frame_pose(FrameIndex(t.wave_start_frame), &t);
    assert!(close(pose.shield[0].start, SHIELD_BASE + SHIELD_BUFFER));
    for n in 1..SHIELD_ARCS {
        let rest = n as f64 * std::f64::consts::FRAC_PI_2 + SHIELD_BASE;
        assert!(close(pose.shield[n].start, rest));
    }
}

#[test]
fn swirl_sweep_is_shared_late_in_the_phase() {
    let t = timing();
    let last = frame_pose(FrameIndex(t.swirl_done_frame - 1), &t);
    // 16 of 17 steps through a 3π/2 sweep: every arc has been caught up.
    let swept = SHIELD_BASE + SHIELD_BUFFER + 3.0 * PI / 2.0 * 16.0 / 17.0;
    assert!(close(last.shield[0].start, swept));
    assert!(close(last.shield[1].start, swept));
    assert!(close(last.shield[2].start, swept));
    assert!(close(
        last.shield[3].start,
        (3.0 * std::f64::consts::FRAC_PI_2 + SHIELD_BASE).max(swept)
    ));
}

#[test]
fn redistribution_fans_out_from_the_pivot() {
    let t = timing();
    let first = frame_pose(FrameIndex(t.swirl_done_frame), &t);
    let pivot = std::f64::consts::FRAC_PI_2 + std::f64::consts::FRAC_PI_4 + SHIELD_BUFFER;
    for arc in first.shield {
        assert!(close(arc.start, pivot));
    }
    let later = frame_pose(FrameIndex(t.swirl_done_frame + 8), &t);
    let step = 8.0 / f64::from(t.loop_start_frame - t.swirl_done_frame);
    for (n, arc) in later.shield.iter().enumerate() {
        let offset = n as f64 * std::f64::consts::FRAC_PI_2 * step;
        assert!(close(arc.start, pivot + offset), "arc {n}");
    }
}

#[test]
fn settle_continues_a_quarter_turn() {
    let t = timing();
    let start = frame_pose(FrameIndex(t.loop_start_frame), &t);
    for (n, arc) in start.shield.iter().enumerate() {
        let expected = n as f64 * std::f64::consts::FRAC_PI_2
            + std::f64::consts::FRAC_PI_4
            + SHIELD_BUFFER;
        assert!(close(arc.start, expected));
    }
    let next = frame_pose(FrameIndex(t.loop_start_frame + 1), &t);
    // (50 - 40) / 2 = 5 settle frames share π/2.
    assert!(close(
        next.shield[0].start - start.shield[0].start,
        std::f64::consts::FRAC_PI_2 / 5.0
    ));
}

#[test]
fn loop_tail_matches_settle_start_up_to_symmetry() {
    let t = timing();
    let tail = frame_pose(FrameIndex(t.total_frames - 1), &t);
    let head = frame_pose(FrameIndex(t.loop_start_frame), &t);
    for arc in head.shield {
        let matched = tail
            .shield
            .iter()
            .any(|other| {
                let d = (arc.start - other.start).rem_euclid(TAU);
                close(d, 0.0) || close(d, TAU)
            });
        assert!(matched, "no tail arc starts at {}", arc.start);
    }
}

#[test]
fn pulses_follow_the_emission_schedule() {
    let t = timing();
    assert!(pulses(FrameIndex(0), &t).is_empty());
    assert!(pulses(FrameIndex(t.wave_start_frame), &t).is_empty());

    let first = pulses(FrameIndex(7), &t);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].wave, 0);
    assert!(close(first[0].radius, t.dist_per_frame));

    let p = pulses(FrameIndex(16), &t);
    assert_eq!(p.len(), 2);
    assert_eq!((p[0].wave, p[1].wave), (0, 1));
    assert!(close(p[0].radius, 10.0 * 75.0 / 44.0));
    assert!(close(p[0].alpha, 0.9 - 10.0 / 44.0));
    assert!(p[1].radius < p[0].radius);
    assert!(p[1].alpha > p[0].alpha);
}

#[test]
fn pulses_fade_and_stop_at_the_cell_edge() {
    let t = timing();
    for i in 0..t.total_frames {
        for p in pulses(FrameIndex(i), &t) {
            assert!(p.radius > 0.0);
            assert!(p.radius < t.wave_reach);
            assert!((0.0..=WAVE_START_ALPHA).contains(&p.alpha));
        }
    }
    // Late in the cycle the oldest pulse has faded out entirely.
    let late = pulses(FrameIndex(49), &t);
    assert_eq!(late[0].wave, 0);
    assert_eq!(late[0].alpha, 0.0);
}

#[test]
fn wedge_is_a_fixed_narrow_sector() {
    let s = PulseWedge::sector();
    assert!(close(s.start, -PI / 12.0));
    assert!(close(s.sweep(), PI / 6.0));
}
