// Host-side tests for the animator lifecycle, driven through a recording
// surface instead of a GPU.

use scene_core::*;
use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default, Debug)]
struct Counters {
    allocations: u32,
    live: i32,
    resizes: Vec<Viewport>,
    draws: u32,
    releases: u32,
    last_items: usize,
}

/// Records every call; the first `fail_draws` draws return a frame error.
struct RecordingSurface {
    counters: Rc<RefCell<Counters>>,
    fail_draws: u32,
}

impl RecordingSurface {
    fn factory(
        counters: &Rc<RefCell<Counters>>,
        fail_draws: u32,
    ) -> impl FnOnce(&SurfaceSetup<'_>) -> Result<RecordingSurface, SceneError> {
        let counters = counters.clone();
        move |setup: &SurfaceSetup<'_>| {
            assert!(!setup.viewport.is_empty());
            assert!(!setup.meshes.is_empty());
            {
                let mut c = counters.borrow_mut();
                c.allocations += 1;
                c.live += 1;
            }
            Ok(RecordingSurface {
                counters,
                fail_draws,
            })
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        let mut c = self.counters.borrow_mut();
        // a resize swaps the backing target: one released, one allocated
        c.allocations += 1;
        c.resizes.push(viewport);
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SceneError> {
        let mut c = self.counters.borrow_mut();
        c.draws += 1;
        c.last_items = frame.items.len();
        if self.fail_draws > 0 {
            self.fail_draws -= 1;
            Err(SceneError::Frame("surface lost".into()))
        } else {
            Ok(())
        }
    }

    fn release(&mut self) {
        let mut c = self.counters.borrow_mut();
        c.releases += 1;
        c.live -= 1;
    }
}

fn running(config: &SceneConfig) -> (SceneAnimator<RecordingSurface>, Rc<RefCell<Counters>>) {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let mut animator = SceneAnimator::new();
    animator
        .initialize(
            config,
            Viewport::new(800, 600),
            RecordingSurface::factory(&counters, 0),
        )
        .unwrap();
    (animator, counters)
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn sixty_ticks_advance_particles_by_true_elapsed_time() {
    let (mut animator, counters) = running(&SceneConfig::default());
    animator.on_pointer_move(0.0, 0.0);
    for k in 0..60 {
        assert_eq!(animator.tick(secs(k as f64 / 60.0)), TickStatus::Drawn);
    }
    let particles = animator.object("particles").unwrap();
    let expected = 59.0 * 0.0003;
    assert!(
        (particles.transform.rotation.y - expected).abs() < 1e-5,
        "rotation.y = {}",
        particles.transform.rotation.y
    );
    assert_eq!(counters.borrow().draws, 60);
    assert_eq!(animator.stats().draw_calls, 60);
    assert_eq!(counters.borrow().last_items, 5);
}

#[test]
fn motion_speed_does_not_depend_on_frame_rate() {
    let (mut fast, _) = running(&SceneConfig::vault());
    let (mut slow, _) = running(&SceneConfig::vault());
    for k in 0..=120 {
        fast.tick(secs(k as f64 / 120.0));
    }
    for k in 0..=20 {
        slow.tick(secs(k as f64 / 20.0));
    }
    for (a, b) in fast.objects().iter().zip(slow.objects()) {
        assert!((a.transform.rotation - b.transform.rotation).length() < 1e-5);
    }
}

#[test]
fn positive_spin_is_monotonic_until_it_wraps() {
    let (mut animator, _) = running(&SceneConfig::hero());
    let mut prev = -1.0f32;
    // ring_a turns once per 20 s; stay inside one turn
    for k in 0..190 {
        animator.tick(secs(k as f64 * 0.1));
        let z = animator.object("ring_a").unwrap().transform.rotation.z;
        assert!(z >= prev, "rotation.z went backward at step {k}");
        assert!(z < TAU);
        prev = z;
    }
}

#[test]
fn clock_going_backward_does_not_rewind_objects() {
    let (mut animator, _) = running(&SceneConfig::vault());
    animator.tick(secs(2.0));
    let before = animator.objects()[0].transform;
    animator.tick(secs(1.0));
    assert_eq!(animator.objects()[0].transform, before);
    assert_eq!(animator.elapsed(), secs(2.0));
}

#[test]
fn dispose_then_tick_draws_nothing() {
    let (mut animator, counters) = running(&SceneConfig::phone());
    animator.tick(secs(0.0));
    animator.dispose();
    assert_eq!(animator.state(), AnimatorState::Disposed);
    assert_eq!(animator.tick(secs(1.0)), TickStatus::Idle);
    animator.on_resize(10, 10);
    animator.on_pointer_move(0.5, 0.5);
    animator.dispose();
    let c = counters.borrow();
    assert_eq!(c.draws, 1);
    assert_eq!(c.releases, 1);
    assert_eq!(c.live, 0);
    assert!(c.resizes.is_empty());
}

#[test]
fn dropping_a_running_animator_releases_the_surface() {
    let (animator, counters) = running(&SceneConfig::vault());
    drop(animator);
    assert_eq!(counters.borrow().releases, 1);
    assert_eq!(counters.borrow().live, 0);
}

#[test]
fn resize_is_idempotent() {
    let (mut animator, counters) = running(&SceneConfig::hero());
    let baseline = counters.borrow().allocations;
    animator.on_resize(1024, 768);
    animator.on_resize(1024, 768);
    assert_eq!(counters.borrow().allocations, baseline + 1);
    assert_eq!(counters.borrow().resizes, vec![Viewport::new(1024, 768)]);
    let cam = animator.camera().unwrap();
    assert!((cam.aspect - 1024.0 / 768.0).abs() < 1e-6);

    // repeating the initial size or an empty one does no work either
    animator.on_resize(1024, 0);
    assert_eq!(counters.borrow().resizes.len(), 1);
    assert_eq!(animator.viewport(), Some(Viewport::new(1024, 768)));
}

#[test]
fn pointer_rotation_stays_within_gains() {
    let (mut animator, _) = running(&SceneConfig::phone());
    let body_gain_yaw = 0.3f32;
    let body_gain_pitch = 0.2f32;
    let samples = [-5.0f32, -1.0, -0.6, 0.0, 0.25, 1.0, 7.0];
    for &x in &samples {
        for &y in &samples {
            animator.on_pointer_move(x, y);
            animator.tick(Duration::ZERO);
            let body = animator.object("phone_body").unwrap();
            let r = body.transform.rotation;
            assert!(r.y.abs() <= body_gain_yaw + 1e-6, "yaw {} for ({x},{y})", r.y);
            assert!(r.x.abs() <= body_gain_pitch + 1e-6, "pitch {} for ({x},{y})", r.x);
        }
    }
}

#[test]
fn pointer_is_observed_on_next_tick_only() {
    let (mut animator, _) = running(&SceneConfig::phone());
    animator.tick(Duration::ZERO);
    animator.on_pointer_move(1.0, 0.0);
    assert_eq!(animator.object("phone_body").unwrap().transform.rotation.y, 0.0);
    animator.tick(Duration::ZERO);
    let yaw = animator.object("phone_body").unwrap().transform.rotation.y;
    assert!((yaw - 0.3).abs() < 1e-6);
}

#[test]
fn non_finite_pointer_is_ignored() {
    let (mut animator, _) = running(&SceneConfig::hero());
    animator.on_pointer_move(0.5, -0.5);
    animator.on_pointer_move(f32::NAN, 0.0);
    assert_eq!(animator.pointer(), PointerState { x: 0.5, y: -0.5 });
}

#[test]
fn failed_surface_leaves_animator_inert() {
    let mut animator: SceneAnimator<RecordingSurface> = SceneAnimator::new();
    let err = animator
        .initialize(&SceneConfig::default(), Viewport::new(800, 600), |_| {
            Err(SceneError::SurfaceUnavailable("no adapter".into()))
        })
        .unwrap_err();
    assert!(err.is_initialization_failure());
    assert_eq!(animator.state(), AnimatorState::Inert);
    assert_eq!(animator.tick(secs(1.0)), TickStatus::Idle);
    animator.on_resize(100, 100);
    animator.dispose();
    animator.dispose();
    assert_eq!(animator.state(), AnimatorState::Disposed);
    assert_eq!(animator.stats(), FrameStats::default());
}

#[test]
fn invalid_config_fails_before_acquiring_a_surface() {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let mut config = SceneConfig::hero();
    config.camera.near = 0.0;
    let mut animator = SceneAnimator::new();
    let err = animator
        .initialize(
            &config,
            Viewport::new(10, 10),
            RecordingSurface::factory(&counters, 0),
        )
        .unwrap_err();
    assert!(matches!(err, SceneError::InvalidConfig(_)));
    assert_eq!(counters.borrow().allocations, 0);
    assert_eq!(animator.state(), AnimatorState::Inert);
}

#[test]
fn unbounded_geometry_leaves_animator_inert() {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let config = SceneConfig::hero()
        .with_overrides(&serde_json::json!({
            "objects": [{
                "name": "dust",
                "primitive": {
                    "kind": "particle_field",
                    "count": u32::MAX,
                    "extent": 20.0,
                    "point_size": 0.02,
                    "colors": [[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]]
                }
            }]
        }))
        .unwrap();
    let mut animator = SceneAnimator::new();
    let err = animator
        .initialize(
            &config,
            Viewport::new(800, 600),
            RecordingSurface::factory(&counters, 0),
        )
        .unwrap_err();
    assert!(matches!(err, SceneError::InvalidConfig(_)));
    assert_eq!(animator.state(), AnimatorState::Inert);
    assert_eq!(animator.tick(secs(1.0)), TickStatus::Idle);
    assert_eq!(counters.borrow().allocations, 0);
    assert_eq!(counters.borrow().draws, 0);
}

#[test]
fn second_initialize_is_rejected() {
    let (mut animator, counters) = running(&SceneConfig::vault());
    let err = animator
        .initialize(
            &SceneConfig::vault(),
            Viewport::new(200, 200),
            RecordingSurface::factory(&counters, 0),
        )
        .unwrap_err();
    assert_eq!(err, SceneError::AlreadyInitialized);
    assert_eq!(counters.borrow().allocations, 1);
    assert!(animator.is_running());
}

#[test]
fn frame_errors_are_absorbed() {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let mut animator = SceneAnimator::new();
    animator
        .initialize(
            &SceneConfig::vault(),
            Viewport::new(200, 200),
            RecordingSurface::factory(&counters, 2),
        )
        .unwrap();
    assert_eq!(animator.tick(secs(0.0)), TickStatus::DrawFailed);
    assert_eq!(animator.tick(secs(0.5)), TickStatus::DrawFailed);
    assert!(animator.is_running());
    // state still advanced through the failed frames
    assert!(animator.objects()[0].transform.rotation.x > 0.0);
    let stats = animator.stats();
    assert_eq!(stats.draw_calls, 2);
    assert_eq!(stats.failed_draws, 2);

    // the surface recovers and the very next frame draws
    assert_eq!(animator.tick(secs(1.0)), TickStatus::Drawn);
    assert_eq!(animator.stats().failed_draws, 2);
    assert_eq!(counters.borrow().draws, 3);
}

#[test]
fn uninitialized_animator_is_idle() {
    let mut animator: SceneAnimator<RecordingSurface> = SceneAnimator::default();
    assert_eq!(animator.state(), AnimatorState::Uninitialized);
    assert_eq!(animator.tick(secs(1.0)), TickStatus::Idle);
    assert!(animator.objects().is_empty());
    assert!(animator.camera().is_none());
    animator.dispose();
    assert_eq!(animator.state(), AnimatorState::Disposed);
}

#[test]
fn camera_parallax_follows_pointer() {
    let (mut animator, _) = running(&SceneConfig::hero());
    animator.on_pointer_move(1.0, 1.0);
    animator.tick(Duration::ZERO);
    let eye = animator.camera().unwrap().eye;
    assert!((eye.x - constants::HERO_CAMERA_PARALLAX).abs() < 1e-6);
    assert!((eye.y - constants::HERO_CAMERA_PARALLAX).abs() < 1e-6);
}
