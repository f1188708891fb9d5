//! Session Tests - Walk Mode Lifecycle
//!
//! End-to-end runs of the walk mode against the in-memory host: entry,
//! per-frame publishing, and exit/respawn bookkeeping.

use std::collections::BTreeSet;

use ground_walk_engine::config::{LocomotionConfig, REFERENCE_FRAME_DT, WalkConfig};
use ground_walk_engine::geo::{GeodeticPosition, to_cartesian};
use ground_walk_engine::input::{InputEvent, KeyCode};
use ground_walk_engine::player::AvatarPart;
use ground_walk_engine::session::{EventResponse, MemoryHost, WalkMode};
use ground_walk_engine::WalkModeError;

const DT: f64 = REFERENCE_FRAME_DT;

struct Harness {
    walk: WalkMode,
    viewer: MemoryHost,
    scene: MemoryHost,
    camera: MemoryHost,
}

impl Harness {
    fn new(aircraft: Option<GeodeticPosition>) -> Self {
        Self {
            walk: WalkMode::new(WalkConfig::default()),
            viewer: aircraft.map_or_else(MemoryHost::new, MemoryHost::with_aircraft),
            scene: MemoryHost::new(),
            camera: MemoryHost::new(),
        }
    }

    fn enter(&mut self) -> Result<GeodeticPosition, WalkModeError> {
        self.walk.enter(&mut self.viewer, &mut self.scene, &mut self.camera)
    }

    fn exit(&mut self) -> Option<GeodeticPosition> {
        self.walk.exit(&mut self.viewer, &mut self.scene)
    }

    fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.walk.frame(DT, &mut self.scene, &mut self.camera);
        }
    }
}

// ============================================================================
// Entry Tests
// ============================================================================

#[test]
fn test_enter_without_vehicle_aborts() {
    let mut h = Harness::new(None);
    assert!(matches!(h.enter(), Err(WalkModeError::NoActiveVehicle)));
    assert_eq!(h.viewer.notifications.len(), 1);
    assert!(h.scene.parts.is_empty());
    assert!(h.viewer.aircraft_spawns.is_empty());
    assert!(!h.walk.is_active());
    assert!(h.walk.frame(DT, &mut h.scene, &mut h.camera).is_none());
}

#[test]
fn test_enter_replaces_aircraft_with_avatar() {
    let mut h = Harness::new(Some(GeodeticPosition::new(0.0, 0.0, 99.0)));
    let spawn = h.enter().unwrap();

    assert!((spawn.height - 100.0).abs() < 1e-9);
    assert_eq!(h.viewer.aircraft(), None);
    assert_eq!(h.viewer.aircraft_removals, 1);
    assert_eq!(h.scene.parts.len(), 7);
    assert!(h.scene.find_part(AvatarPart::Label).is_some());
    assert!(h.camera.last_view.is_some());
}

// ============================================================================
// Frame Tests
// ============================================================================

#[test]
fn test_forward_second_from_equator() {
    let mut h = Harness::new(Some(GeodeticPosition::new(0.0, 0.0, 99.0)));
    h.enter().unwrap();

    assert_eq!(h.walk.handle_event(InputEvent::KeyDown(KeyCode::W)), EventResponse::Consumed);
    h.frames(60);

    let target = h.walk.session().unwrap().state().target_geodetic();
    let expected = (4.0 / 6_371_000.0_f64).to_degrees();
    assert!((target.latitude - expected).abs() < 1e-10);
    assert!(target.longitude.abs() < 1e-10);
    assert!((target.height - 100.0).abs() < 1e-6);
}

#[test]
fn test_frames_publish_rig_and_camera() {
    let mut h = Harness::new(Some(GeodeticPosition::new(35.0, 139.0, 10.0)));
    h.enter().unwrap();
    h.walk.handle_event(InputEvent::KeyDown(KeyCode::D));
    h.frames(10);

    assert_eq!(h.camera.view_updates, 11);
    for live in h.scene.parts.values() {
        assert_eq!(live.moves, 10);
    }

    let pose = h.camera.last_view.unwrap();
    let body = h.scene.find_part(AvatarPart::Body).unwrap();
    let avatar = h.scene.part_position(body).unwrap();
    assert!((pose.position.distance(avatar) - 1.6).abs() < 1e-6);
}

#[test]
fn test_pointer_look_gated_by_lock() {
    let mut h = Harness::new(Some(GeodeticPosition::new(0.0, 0.0, 0.0)));
    h.enter().unwrap();

    assert_eq!(
        h.walk.handle_event(InputEvent::PointerMove { dx: 500.0, dy: 0.0 }),
        EventResponse::Ignored
    );
    h.frames(5);
    assert_eq!(h.walk.session().unwrap().look().yaw, 0.0);

    h.walk.handle_event(InputEvent::PointerLockChanged(true));
    h.walk.handle_event(InputEvent::PointerMove { dx: 500.0, dy: 0.0 });
    h.frames(5);
    assert!(h.walk.session().unwrap().look().yaw > 0.0);
}

#[test]
fn test_focus_loss_stops_walking() {
    let mut h = Harness::new(Some(GeodeticPosition::new(0.0, 0.0, 0.0)));
    h.enter().unwrap();
    h.walk.handle_event(InputEvent::KeyDown(KeyCode::W));
    h.frames(3);
    assert!(h.walk.session().unwrap().is_walking());

    h.walk.handle_event(InputEvent::FocusLost);
    h.frames(1);
    assert!(!h.walk.session().unwrap().is_walking());
}

#[test]
fn test_spawn_beyond_latitude_limit_steps_without_jump() {
    let mut h = Harness::new(Some(GeodeticPosition::new(89.9, 0.0, 9.0)));
    let spawn = h.enter().unwrap();
    let start = to_cartesian(spawn);

    h.walk.handle_event(InputEvent::KeyDown(KeyCode::D));
    h.frames(1);

    let session = h.walk.session().unwrap();
    assert!(start.distance(session.state().current) < 0.1);
    assert!(start.distance(session.state().target) < 0.1);
    assert!((session.position().latitude - 89.9).abs() < 1e-6);

    // Walking away from the pole works normally
    h.walk.handle_event(InputEvent::KeyUp(KeyCode::D));
    h.walk.handle_event(InputEvent::KeyDown(KeyCode::S));
    h.frames(60);
    let target = h.walk.session().unwrap().state().target_geodetic();
    assert!(target.latitude < 89.9);
    assert!(to_cartesian(target).distance(start) < 4.1);
}

#[test]
fn test_negative_idle_lerp_does_not_diverge() {
    let config = WalkConfig {
        locomotion: LocomotionConfig {
            idle_lerp: -0.5,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut h = Harness::new(Some(GeodeticPosition::new(0.0, 0.0, 0.0)));
    h.walk = WalkMode::new(config);
    h.enter().unwrap();

    h.walk.handle_event(InputEvent::KeyDown(KeyCode::W));
    h.frames(10);
    h.walk.handle_event(InputEvent::KeyUp(KeyCode::W));

    let mut previous = h.walk.session().unwrap().state().remaining_distance();
    for _ in 0..30 {
        h.frames(1);
        let remaining = h.walk.session().unwrap().state().remaining_distance();
        assert!(remaining <= previous + 1e-8);
        previous = remaining;
    }
    assert!(previous < 1.0);
}

// ============================================================================
// Exit Tests
// ============================================================================

#[test]
fn test_exit_while_walking_respawns_once_and_cleans_up() {
    let mut h = Harness::new(Some(GeodeticPosition::new(48.85, 2.35, 40.0)));
    h.enter().unwrap();
    let created: BTreeSet<_> = h.scene.parts.keys().copied().collect();

    h.walk.handle_event(InputEvent::KeyDown(KeyCode::W));
    h.walk.handle_event(InputEvent::KeyDown(KeyCode::ShiftLeft));
    h.frames(45);
    assert!(h.walk.session().unwrap().is_walking());
    let before_exit = h.walk.avatar_position().unwrap();

    let last = h.exit().unwrap();
    assert_eq!(last, before_exit);

    assert_eq!(h.viewer.aircraft_spawns.len(), 1);
    let respawn = h.viewer.aircraft_spawns[0];
    assert!((respawn.location.latitude - last.latitude).abs() < 1e-12);
    assert!((respawn.location.longitude - last.longitude).abs() < 1e-12);
    assert!((respawn.location.height - (last.height + 100.0)).abs() < 1e-9);
    assert_eq!(respawn.heading_deg, 0.0);

    assert!(h.scene.parts.is_empty());
    assert_eq!(h.scene.removed.len(), created.len());
    let removed: BTreeSet<_> = h.scene.removed.iter().copied().collect();
    assert_eq!(removed, created);

    assert!(!h.walk.is_active());
    assert!(h.exit().is_none());
    assert_eq!(h.viewer.aircraft_spawns.len(), 1);
}

#[test]
fn test_set_avatar_position_while_walking() {
    let mut h = Harness::new(Some(GeodeticPosition::new(0.0, 0.0, 0.0)));
    h.enter().unwrap();
    assert!(h.walk.set_avatar_position(GeodeticPosition::new(10.0, 20.0, 30.0)));

    let p = h.walk.avatar_position().unwrap();
    assert!((p.latitude - 10.0).abs() < 1e-9);
    assert!((p.longitude - 20.0).abs() < 1e-9);
    assert!((p.height - 30.0).abs() < 1e-6);
}

#[test]
fn test_reentry_starts_fresh_session() {
    let mut h = Harness::new(Some(GeodeticPosition::new(0.0, 0.0, 0.0)));
    h.enter().unwrap();
    h.walk.handle_event(InputEvent::KeyDown(KeyCode::W));
    h.frames(10);
    h.exit().unwrap();

    h.enter().unwrap();
    let session = h.walk.session().unwrap();
    assert_eq!(session.frames(), 0);
    h.frames(1);
    assert!(!h.walk.session().unwrap().is_walking());
}
