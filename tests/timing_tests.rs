// Host-side tests for cyclic timelines, deferred tasks and easing helpers.

use glam::Vec2;
use illustrations_core::easing::*;
use illustrations_core::*;

fn timeline(durations: &[f64]) -> Timeline<usize> {
    Timeline::new(durations.iter().enumerate().map(|(i, &d)| Phase::new(i, d))).expect("valid timeline")
}

#[test]
fn progress_stays_below_one_and_grows_within_a_phase() {
    let tl = timeline(&[1700.0, 1500.0, 1800.0, 1800.0]);
    let mut last = (0, -1.0f32);
    let mut t = 0.0;
    while t < tl.total() {
        let state = tl.at(t);
        assert!((0.0..1.0).contains(&state.progress), "t={t}");
        assert_eq!(*state.label, state.index);
        if state.index == last.0 {
            assert!(state.progress > last.1);
        } else {
            assert_eq!(state.index, last.0 + 1);
        }
        last = (state.index, state.progress);
        t += 7.0;
    }
}

#[test]
fn boundaries_belong_to_the_next_phase() {
    let tl = timeline(&[100.0, 200.0, 300.0]);
    assert_eq!(tl.at(0.0).index, 0);
    assert_eq!(tl.at(99.999).index, 0);
    assert_eq!(tl.at(100.0).index, 1);
    assert_eq!(tl.at(100.0).progress, 0.0);
    assert_eq!(tl.at(300.0).index, 2);
    assert_eq!(tl.at(600.0).index, 0, "wraps at the cycle length");
    assert_eq!(tl.at(-50.0).index, 2, "negative time wraps backwards");
    assert_eq!(tl.at(f64::NAN).index, 0);
}

#[test]
fn progress_never_rounds_up_to_one() {
    let tl = timeline(&[1e9, 1.0]);
    let state = tl.at(1e9 - 1e-3);
    assert_eq!(state.index, 0);
    assert!(state.progress < 1.0);
}

#[test]
fn zero_length_phases_are_skipped() {
    let tl = timeline(&[0.0, 50.0, 0.0, 50.0]);
    assert_eq!(tl.at(0.0).index, 1);
    assert_eq!(tl.at(50.0).index, 3);
    assert_eq!(tl.at(100.0).index, 1);
}

#[test]
fn phase_offsets_invert_lookup() {
    let tl = timeline(&[1700.0, 1500.0, 1800.0, 1800.0]);
    let sum: f64 = tl.phases().iter().map(|p| p.duration).sum();
    assert_eq!(tl.total(), sum);
    assert_eq!(tl.phase_start(2), 3200.0);
    for index in 0..tl.len() {
        for progress in [0.0f32, 0.25, 0.5, 0.9] {
            let state = tl.at(tl.offset_of(index, progress));
            assert_eq!(state.index, index);
            assert!((state.progress - progress).abs() < 1e-4);
        }
    }
}

#[test]
fn invalid_timelines_are_rejected() {
    let empty: Vec<Phase<()>> = Vec::new();
    assert_eq!(Timeline::new(empty).err(), Some(TimelineError::Empty));
    assert_eq!(
        Timeline::new([Phase::new((), 10.0), Phase::new((), -1.0)]).err(),
        Some(TimelineError::InvalidDuration {
            index: 1,
            duration: -1.0,
        })
    );
    assert!(matches!(
        Timeline::new([Phase::new((), f64::INFINITY)]),
        Err(TimelineError::InvalidDuration { index: 0, .. })
    ));
    assert_eq!(
        Timeline::new([Phase::new((), 0.0), Phase::new((), 0.0)]).err(),
        Some(TimelineError::ZeroLength)
    );
}

fn owner(scene: u32, lane: TaskLane) -> TaskOwner {
    TaskOwner {
        scene: SceneId(scene),
        lane,
    }
}

#[test]
fn tasks_drain_in_due_order() {
    let mut queue = TaskQueue::new();
    let flip = owner(0, TaskLane::CardFlip);
    queue.schedule(flip, 300.0, "c");
    queue.schedule(flip, 100.0, "a");
    queue.schedule(flip, 100.0, "b");
    queue.schedule(flip, 900.0, "d");

    assert!(queue.drain_due(99.0).is_empty());
    let due: Vec<&str> = queue.drain_due(300.0).into_iter().map(|(_, p)| p).collect();
    assert_eq!(due, vec!["a", "b", "c"]);
    assert_eq!(queue.len(), 1);
}

#[test]
fn cancelling_is_scoped_to_owner_and_scene() {
    let mut queue = TaskQueue::new();
    let a_flip = owner(0, TaskLane::CardFlip);
    let a_spawn = owner(0, TaskLane::CardSpawn);
    let b_flip = owner(1, TaskLane::CardFlip);
    let id = queue.schedule(a_flip, 10.0, 1);
    queue.schedule(a_flip, 20.0, 2);
    queue.schedule(a_spawn, 20.0, 3);
    queue.schedule(b_flip, 20.0, 4);

    assert!(queue.cancel(id));
    assert!(!queue.cancel(id), "a task is cancelled once");
    assert_eq!(queue.cancel_owner(a_flip), 1);
    assert_eq!(queue.pending(a_spawn), 1);
    assert_eq!(queue.cancel_scene(SceneId(0)), 1);
    assert_eq!(queue.pending(b_flip), 1);
    assert_eq!(queue.drain_due(100.0), vec![(b_flip, 4)]);
    assert!(queue.is_empty());
}

#[test]
fn easing_curves_fix_their_endpoints() {
    for ease in [ease_in_out, ease_out_quad, ease_in_cubic] {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
        assert_eq!(ease(-3.0), 0.0);
        assert_eq!(ease(7.0), 1.0);
    }
    assert_eq!(ease_in_out(0.5), 0.5);
    for strength in [0.0, 0.5, 1.0] {
        assert_eq!(warp(0.0, strength), 0.0);
        assert_eq!(warp(0.5, strength), 0.5);
        assert_eq!(warp(1.0, strength), 1.0);
    }
    assert!(warp(0.2, 1.0) > 0.2, "values are pulled toward the middle");
}

#[test]
fn looping_and_ping_pong_stay_in_the_unit_interval() {
    for i in 0..2_000 {
        let time = i as f64 * 37.0;
        let l = looping(time, 0.00018, 0.3);
        assert!((0.0..=1.0).contains(&l));
        let p = ping_pong(time, 0.00022);
        assert!((0.0..=1.0).contains(&p));
    }
    assert_eq!(ping_pong(1.5, 1.0), 0.5);
}

#[test]
fn long_session_phases_are_reduced_before_narrowing() {
    use std::f64::consts::TAU;
    let time = 1e9;
    for speed in [0.0006, 0.0021, 0.04] {
        let a = angle(time, speed);
        assert!((0.0..TAU as f32).contains(&a));
        let exact = (time * speed).sin();
        assert!((a.sin() as f64 - exact).abs() < 1e-4, "speed={speed}");
    }
    let dash = wrapped(time + 3.0, 0.04, 10.0);
    assert!((dash - 0.12).abs() < 1e-3);
    assert_eq!(wrapped(-5.0, 1.0, 10.0), 5.0);
}

#[test]
fn path_sampler_walks_by_arc_length() {
    let path = PathSampler::new(vec![Vec2::ZERO, Vec2::new(30.0, 0.0), Vec2::new(30.0, 10.0)]);
    assert_eq!(path.total_length(), 40.0);
    let mid = path.point_at(0.5).expect("non-empty path");
    assert!(mid.distance(Vec2::new(20.0, 0.0)) < 1e-4);
    assert_eq!(path.point_at(0.875), Some(Vec2::new(30.0, 5.0)));
    assert_eq!(path.point_at(2.0), Some(Vec2::new(30.0, 10.0)));
    assert_eq!(PathSampler::new(Vec::new()).point_at(0.5), None);
}

#[test]
fn chord_beziers_run_from_start_to_end() {
    let curve = CubicBezier::along_chord(Vec2::ZERO, Vec2::new(100.0, 50.0), 0.35, 0.7);
    assert_eq!(curve.point(0.0), Vec2::ZERO);
    assert!(curve.point(1.0).distance(Vec2::new(100.0, 50.0)) < 1e-3);
    assert_eq!(curve.point_dir(0.0, true), curve.point(1.0));
    let partial = curve.partial(0.5, 10);
    assert_eq!(partial.len(), 11);
    assert!(partial[10].distance(curve.point(0.5)) < 1e-4);
}
