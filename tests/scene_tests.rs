// Host-side tests for the illustration scenes and the scene registry.

use glam::Vec2;
use illustrations_core::scenes::{
    branch, fill::FillOutcome, flow, greedy_route, pulses, rings::RingGeometry, speed, strain,
    BranchScene, CardAnchor, FillScene, Lattice, Pulse, PulseScene, PulseSet, RingsScene, RoutingScene,
    SpeedPhase, SpeedScene, StrainScene, WaveScene,
};
use illustrations_core::*;

fn input(width: f32, height: f32, elapsed: f64) -> RenderInput {
    RenderInput {
        width,
        height,
        elapsed,
        ..RenderInput::default()
    }
}

/// Render one frame straight into a recording surface.
fn draw<S: Render>(scene: &mut S, surface: &mut RecordingSurface, input: RenderInput) -> OverlaySink {
    let mut sink = OverlaySink::new();
    let mut frame = Frame {
        input,
        surface,
        overlay: &mut sink,
    };
    scene.render(&mut frame).expect("scene renders");
    sink
}

fn registered(name: &str, layout: Layout) -> (SceneScheduler<RecordingSurface>, SceneId) {
    let mut sched = SceneScheduler::new();
    let decl = SceneDecl {
        name,
        config: SceneConfig::default(),
        layout,
    };
    let id = lifecycle::try_register(&mut sched, &decl, Some(RecordingSurface::new())).expect("known scene");
    (sched, id)
}

#[test]
fn greedy_routes_step_between_neighbours_and_reach_the_destination() {
    let lattice = Lattice::new(6, 10, Vec2::new(0.1, 0.1));
    for start in 0..lattice.len() {
        for dest in 0..lattice.len() {
            let route = greedy_route(&lattice, start, dest);
            assert_eq!(route.first(), Some(&start));
            assert_eq!(route.last(), Some(&dest));
            assert!(route.len() <= lattice.rows() * lattice.cols());
            for pair in route.windows(2) {
                assert!(lattice.adjacent(pair[0], pair[1]), "{:?}", route);
            }
            let (sr, sc) = lattice.row_col(start);
            let (dr, dc) = lattice.row_col(dest);
            assert_eq!(route.len() - 1, sr.abs_diff(dr).max(sc.abs_diff(dc)));
        }
    }
}

#[test]
fn routing_scene_rebuilds_valid_routes_forever() {
    let mut scene = RoutingScene::new(&SceneConfig::default());
    let dest = scene.destination();
    for _ in 0..500 {
        let route = scene.route().to_vec();
        assert!(route.len() >= 2, "start never equals the destination");
        assert_ne!(route[0], dest);
        assert_eq!(route.last(), Some(&dest));
        assert!(route.windows(2).all(|p| scene.lattice().adjacent(p[0], p[1])));
        assert!(scene.segment() + 1 < route.len());
        scene.advance(97.0);
    }
}

#[test]
fn rings_stay_ordered_under_fast_pointer_motion() {
    let mut scene = RingsScene::new(&SceneConfig::default());
    let mut surface = RecordingSurface::new();
    scene.on_resize(&Layout::new(640.0, 360.0, 1.0));

    for i in 0..400 {
        let mut frame_input = input(640.0, 360.0, i as f64 * 16.0);
        // Jump between opposite corners every frame.
        let corner = if i % 2 == 0 { 1.0 } else { -1.0 };
        frame_input.pointer = PointerSample {
            x: corner,
            y: -corner,
            active: i % 50 < 40,
        };
        draw(&mut scene, &mut surface, frame_input);

        let geometry = *scene.geometry().expect("laid out");
        assert!(scene.rings().is_ordered(geometry.min_gap), "frame {i}");
        let radii: Vec<f32> = surface.circles().map(|(_, r)| r).collect();
        assert_eq!(radii.len(), scene.rings().radii().len());
        assert!(radii.windows(2).all(|w| w[1] > w[0]));
    }
}

#[test]
fn focal_dot_stays_inside_the_innermost_ring() {
    let size = Vec2::new(500.0, 300.0);
    let geometry = RingGeometry::new(size, Vec2::splat(0.5), 1.0, 9);
    let mut rings = illustrations_core::scenes::RingSet::new(9);
    rings.reset(&geometry);
    for desired in [Vec2::new(500.0, 300.0), Vec2::new(0.0, 0.0), geometry.center] {
        rings.relax(&geometry, desired.distance(geometry.center), 0.0);
        let dot = rings.focal_point(&geometry, desired);
        let limit = (rings.radii()[0] - geometry.dot_padding).max(0.0);
        assert!(dot.distance(geometry.center) <= limit + 1e-3);
    }
}

#[test]
fn rings_rebuild_geometry_when_the_surface_size_changes() {
    let mut scene = RingsScene::new(&SceneConfig::default());
    let mut surface = RecordingSurface::new();
    draw(&mut scene, &mut surface, input(400.0, 400.0, 0.0));
    let small = *scene.geometry().expect("laid out");
    draw(&mut scene, &mut surface, input(800.0, 400.0, 16.0));
    let wide = *scene.geometry().expect("laid out");
    assert_eq!(wide.size, Vec2::new(800.0, 400.0));
    assert!(wide.ring_gap > small.ring_gap);
}

#[test]
fn order_card_flips_on_each_phase_change() {
    let anchor = CardAnchor {
        left_x: 420.0,
        right_x: 600.0,
        center_x: 510.0,
        center_y: 180.0,
    };
    let (mut sched, id) = registered("speed", Layout::new(640.0, 360.0, 1.0).with_card_anchor(anchor));
    let mut env = Environment::new();

    match sched.slot(id).map(|s| s.scene()) {
        Some(SceneVariant::Speed(scene)) => assert_eq!(scene.card_anchor(), Some(anchor)),
        _ => panic!("speed scene expected"),
    }

    let first = sched.tick(0.0, &mut env);
    assert_eq!(
        first.overlay,
        vec![
            (id, OverlayCommand::EndFlip),
            (id, OverlayCommand::ShowCard(speed::CARD_STATES[0])),
        ],
        "the first card appears without a flip"
    );

    let mut log = Vec::new();
    let mut now = 0.0;
    while now < 2_600.0 {
        now += 16.0;
        for (_, cmd) in sched.tick(now, &mut env).overlay {
            log.push((now, cmd));
        }
    }

    let flip_at = speed::PHASES[0].1;
    let begin = log
        .iter()
        .position(|(_, c)| *c == OverlayCommand::BeginFlip)
        .expect("flip started");
    let begin_at = log[begin].0;
    assert!(begin_at >= flip_at && begin_at < flip_at + 16.0);

    let rest: Vec<_> = log[begin + 1..].iter().map(|(t, c)| (*t - begin_at, c.clone())).collect();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].1, OverlayCommand::ShowCard(speed::CARD_STATES[1]));
    assert!(rest[0].0 >= speed::FLIP_SWAP_MS && rest[0].0 < speed::FLIP_SWAP_MS + 16.0);
    assert_eq!(rest[1].1, OverlayCommand::EndFlip);
    assert!(rest[1].0 >= speed::FLIP_SETTLE_MS && rest[1].0 < speed::FLIP_SETTLE_MS + 16.0);
}

#[test]
fn order_card_swaps_instantly_under_reduced_motion() {
    let mut scene = SpeedScene::new(&SceneConfig::default()).expect("valid timeline");
    let mut surface = RecordingSurface::new();
    draw(&mut scene, &mut surface, input(640.0, 360.0, 0.0));

    let mut reduced = input(640.0, 360.0, speed::PHASES[0].1 + 10.0);
    reduced.reduced_motion = true;
    let sink = draw(&mut scene, &mut surface, reduced);
    assert_eq!(
        sink.immediate(),
        &[
            OverlayCommand::EndFlip,
            OverlayCommand::ShowCard(speed::CARD_STATES[1]),
        ]
    );
    assert_eq!(sink.delayed().count(), 0);
}

#[test]
fn order_phases_cover_one_cycle() {
    let scene = SpeedScene::new(&SceneConfig::default()).expect("valid timeline");
    let total: f64 = speed::PHASES.iter().map(|(_, d)| d).sum();
    assert_eq!(scene.timeline().total(), total);
    assert_eq!(*scene.timeline().at(total + 1.0).label, SpeedPhase::Scan);
    assert_eq!(*scene.timeline().at(speed::PHASES[0].1).label, SpeedPhase::Collapse);
}

#[test]
fn pulse_set_evicts_the_oldest_and_prunes_faded_pulses() {
    let mut set = PulseSet::default();
    for i in 0..10 {
        set.push(Pulse {
            origin: Vec2::splat(0.5),
            start: i as f64 * 100.0,
            seed: 0.0,
        });
    }
    assert_eq!(set.len(), pulses::MAX_PULSES);
    assert_eq!(set.iter().next().map(|p| p.start), Some(300.0));

    let fade = pulses::PULSE_DURATION_MS * pulses::PULSE_LIFETIME;
    set.prune(300.0 + fade + 50.0);
    assert_eq!(set.len(), pulses::MAX_PULSES - 1);
    set.prune(10_000.0);
    assert!(set.is_empty());
}

#[test]
fn visibility_pulses_spawn_cards_that_are_later_removed() {
    let mut scene = PulseScene::new(&SceneConfig::default());
    let mut surface = RecordingSurface::new();
    let mut spawned = Vec::new();
    let mut removals = Vec::new();

    for i in 0..800 {
        let sink = draw(&mut scene, &mut surface, input(640.0, 360.0, i as f64 * 16.0));
        assert!(scene.pulses().len() <= pulses::MAX_PULSES);
        for cmd in sink.immediate() {
            if let OverlayCommand::SpawnCard { id, position, .. } = cmd {
                assert!(position.is_finite());
                spawned.push(*id);
            }
        }
        for (lane, delay, cmd) in sink.delayed() {
            assert_eq!(lane, TaskLane::CardSpawn);
            assert!(delay > 0.0);
            if let OverlayCommand::RemoveCard { id } = cmd {
                removals.push(*id);
            }
        }
    }
    assert!(!spawned.is_empty());
    assert_eq!(spawned, removals, "every spawned card has a matching removal");
    let mut unique = spawned.clone();
    unique.dedup();
    assert_eq!(unique.len(), spawned.len());
}

#[test]
fn visibility_spawns_nothing_while_paused_and_one_card_in_low_power() {
    let mut paused_scene = PulseScene::new(&SceneConfig::default());
    let mut surface = RecordingSurface::new();
    for i in 0..300 {
        let mut frame_input = input(640.0, 360.0, i as f64 * 16.0);
        frame_input.paused = true;
        let sink = draw(&mut paused_scene, &mut surface, frame_input);
        assert!(sink.is_empty());
    }
    assert!(paused_scene.pulses().is_empty());

    let mut calm = PulseScene::new(&SceneConfig::default());
    for i in 0..600 {
        let mut frame_input = input(640.0, 360.0, i as f64 * 16.0);
        frame_input.low_power = true;
        let sink = draw(&mut calm, &mut surface, frame_input);
        let cards = sink
            .immediate()
            .iter()
            .filter(|c| matches!(c, OverlayCommand::SpawnCard { .. }))
            .count();
        assert!(cards <= 1);
    }
}

#[test]
fn branch_traveler_picks_a_new_branch_every_round_trip() {
    let mut scene = BranchScene::new(&SceneConfig::default());
    let leg = branch::SEGMENT_MS + branch::HOLD_MS;
    for _ in 0..50 {
        let before = scene.target();
        assert!(before < scene.branch_count());
        assert!(scene.outbound());
        scene.advance(leg * 2.0);
        assert!(!scene.outbound());
        assert_eq!(scene.target(), before, "the return trip keeps its branch");
        scene.advance(leg * 2.0);
        assert!(scene.outbound());
        assert_ne!(scene.target(), before);
    }
}

#[test]
fn strain_intensity_follows_the_segment_table() {
    let scene = StrainScene::new(&SceneConfig::default()).expect("valid timeline");
    let hold_end = strain::SEGMENTS[0].1;
    let smooth_at = hold_end + strain::SEGMENTS[1].1 + 100.0;

    assert_eq!(scene.intensity(0.0, false), 1.0);
    assert_eq!(scene.intensity(smooth_at, false), 0.0);
    let mid = scene.intensity(hold_end + strain::SEGMENTS[1].1 * 0.5, false);
    assert!(mid > 0.0 && mid < 1.0);
    assert_eq!(scene.intensity(0.0, true), 0.0, "reduced motion shows the calm shape");
}

#[test]
fn fill_outcome_direction_depends_on_the_ratio() {
    let low = FillOutcome::from_ratio(0.5);
    assert_eq!(low.direction, 1.0);
    assert_eq!(low.tone, Tone::Primary);
    let high = FillOutcome::from_ratio(0.51);
    assert_eq!(high.direction, -1.0);
    assert_eq!(high.tone, Tone::Accent);
}

#[test]
fn fill_scene_draws_a_new_outcome_every_cycle() {
    use illustrations_core::scenes::fill::CYCLE_MS;

    let mut scene = FillScene::new(&SceneConfig::default());
    let mut surface = RecordingSurface::new();
    draw(&mut scene, &mut surface, input(480.0, 270.0, 0.0));
    assert_eq!(scene.cycles(), 1);
    assert!(scene.dot_count() > 0);

    draw(&mut scene, &mut surface, input(480.0, 270.0, CYCLE_MS - 1.0));
    assert_eq!(scene.cycles(), 1);
    draw(&mut scene, &mut surface, input(480.0, 270.0, CYCLE_MS));
    assert_eq!(scene.cycles(), 2);

    let outcome = scene.outcome();
    assert!((0.0..=1.0).contains(&outcome.ratio));
    assert_eq!(outcome, FillOutcome::from_ratio(outcome.ratio));

    scene.on_resize(&Layout::new(300.0, 200.0, 1.0));
    assert_eq!(scene.dot_count(), 0, "grid is rebuilt on the next frame");
}

#[test]
fn particle_count_overrides_scene_defaults() {
    let mut config = SceneConfig::default();
    config.apply("data-particles", "1").expect("in range");
    assert_eq!(WaveScene::new(&config).posts(), 2);
    assert_eq!(WaveScene::new(&SceneConfig::default()).posts(), illustrations_core::scenes::wave::POST_COUNT);
}

#[test]
fn flow_cycle_has_three_phases() {
    let scene = illustrations_core::scenes::FlowScene::new(&SceneConfig::default()).expect("valid timeline");
    assert_eq!(scene.timeline().len(), 3);
    assert!((scene.timeline().total() - flow::CYCLE_MS).abs() < 1e-6);
}

#[test]
fn registry_resolves_every_declared_name() {
    let kinds: Vec<SceneKind> = SceneKind::all().collect();
    assert_eq!(kinds.len(), 10);
    for kind in kinds {
        assert_eq!(SceneKind::from_name(kind.name()), Some(kind));
        let scene = kind.build(&SceneConfig::default()).expect("builds");
        assert_eq!(scene.kind(), kind);
    }
    assert_eq!(" speed ".parse::<SceneKind>(), Ok(SceneKind::Speed));
    assert_eq!(
        "aurora".parse::<SceneKind>(),
        Err(SetupError::UnknownScene("aurora".to_string()))
    );
}

#[test]
fn containers_that_cannot_host_a_scene_are_skipped() {
    let mut sched: SceneScheduler<RecordingSurface> = SceneScheduler::new();
    let layout = Layout::new(320.0, 200.0, 1.0);

    let unknown = SceneDecl {
        name: "aurora",
        config: SceneConfig::default(),
        layout,
    };
    assert!(lifecycle::register(&mut sched, &unknown, Some(RecordingSurface::new())).is_none());

    let no_canvas = SceneDecl {
        name: "savings",
        config: SceneConfig::default(),
        layout,
    };
    assert_eq!(
        lifecycle::try_register(&mut sched, &no_canvas, None),
        Err(SetupError::MissingSurface("savings".to_string()))
    );
    assert!(sched.is_empty());

    let id = lifecycle::register(&mut sched, &no_canvas, Some(RecordingSurface::new())).expect("registered");
    assert_eq!(sched.len(), 1);
    assert_eq!(sched.slot(id).map(|s| s.name()), Some("savings"));
    assert_eq!(sched.slot(id).map(|s| s.size().width), Some(320.0));
}

#[test]
fn every_scene_renders_through_the_scheduler() {
    for kind in SceneKind::all() {
        for layout in [Layout::new(640.0, 360.0, 2.0), Layout::new(90.0, 60.0, 1.0)] {
            let (mut sched, id) = registered(kind.name(), layout);
            let mut env = Environment::new();
            let rect = ClientRect {
                left: 0.0,
                top: 0.0,
                width: layout.width,
                height: layout.height,
            };
            for i in 0..400 {
                if i % 90 == 30 {
                    sched.pointer_move(id, Vec2::new(layout.width * 0.8, layout.height * 0.2), rect);
                } else if i % 90 == 70 {
                    sched.pointer_leave(id);
                }
                let report = sched.tick(i as f64 * 16.0, &mut env);
                assert!(report.faults.is_empty(), "{}: {:?}", kind.name(), report.faults);
            }
            let slot = sched.slot(id).expect("slot");
            assert_eq!(slot.status(), SlotStatus::Running);
            assert_eq!(slot.renders(), 400);
            assert!(slot.surface().frames >= 400);
            assert!(slot.surface().last_frame().len() > 1, "{} drew nothing", kind.name());
        }
    }
}

#[test]
fn every_scene_renders_in_low_power_mode() {
    for kind in SceneKind::all() {
        let mut scene = kind.build(&SceneConfig::default()).expect("builds");
        let mut surface = RecordingSurface::new();
        scene.on_resize(&Layout::new(480.0, 270.0, 1.0));
        for i in 0..200 {
            let mut frame_input = input(480.0, 270.0, i as f64 * 33.0);
            frame_input.low_power = true;
            draw(&mut scene, &mut surface, frame_input);
        }
        assert_eq!(surface.frames, 200);
    }
}
