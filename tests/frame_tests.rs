// Host-side tests for the per-frame update: idle spin, camera and colour.

use glam::Vec3;
use scene_core::*;

fn state() -> SceneState {
    let cfg = SceneConfig {
        particle_seed: Some(5),
        ..Default::default()
    };
    SceneState::new(&cfg, Viewport::new(1000.0, 1000.0, 1.0, 2.0)).unwrap()
}

#[test]
fn idle_spin_is_monotonic_and_rate_scaled() {
    let mut s = state();
    let mut q = CommandQueue::new();
    let mut clock = FrameClock::new();
    let mut prev: Vec<Vec3> = s.scene.meshes.iter().map(|m| m.rotation).collect();
    let mut t = 0.0;
    for i in 0..120 {
        // Uneven frame pacing.
        t += if i % 3 == 0 { 0.033 } else { 0.016 };
        let dt = clock.tick(t);
        s.update(&mut q, dt);
        for (m, p) in s.scene.meshes.iter().zip(&prev) {
            assert!(m.rotation.x >= p.x && m.rotation.y >= p.y);
            assert!((m.rotation.x - p.x - dt * IDLE_SPIN_X).abs() < 1e-5);
            assert!((m.rotation.y - p.y - dt * IDLE_SPIN_Y).abs() < 1e-5);
        }
        prev = s.scene.meshes.iter().map(|m| m.rotation).collect();
    }
    let total = clock.elapsed() as f32;
    assert!((prev[0].x - total * IDLE_SPIN_X).abs() < 1e-4);
}

#[test]
fn camera_follows_scroll_in_section_units() {
    let mut s = state();
    let mut q = CommandQueue::new();
    for (offset, expected_y) in [(0.0, 0.0), (500.0, -2.0), (1000.0, -4.0), (2000.0, -8.0)] {
        q.push(InputCommand::Scroll { offset_px: offset });
        s.update(&mut q, 0.0);
        assert!((s.rig().camera_local.y - expected_y).abs() < 1e-5);
    }
    // The camera keeps its depth inside the rig.
    assert_eq!(s.rig().camera_local.z, CAMERA_Z);
}

#[test]
fn parallax_and_scroll_are_independent() {
    let mut s = state();
    let mut q = CommandQueue::new();
    q.push(InputCommand::Scroll { offset_px: 1000.0 });
    q.push(InputCommand::PointerMove {
        client_x: 0.0,
        client_y: 0.0,
    });
    for _ in 0..300 {
        s.update(&mut q, 1.0 / 60.0);
    }
    let rig = s.rig();
    assert!((rig.group_position.x + 0.5).abs() < 1e-3);
    assert!((rig.group_position.y - 0.5).abs() < 1e-3);
    assert!((rig.camera_local.y + 4.0).abs() < 1e-5);
    assert!((rig.eye().y - (0.5 - 4.0)).abs() < 1e-3);
}

#[test]
fn color_change_propagates_without_touching_geometry() {
    let mut s = state();
    let mut q = CommandQueue::new();
    let tri_before: Vec<usize> = s.scene.meshes.iter().map(|m| m.data.triangle_count()).collect();
    let points_before = s.scene.particles.positions.clone();
    let c = Rgb::parse_hex("#00ff7f").unwrap();
    q.push(InputCommand::SetMaterialColor(c));
    let report = s.update(&mut q, 0.016);
    assert!(report.color_changed);
    assert_eq!(s.scene.material.color, c);
    assert_eq!(s.scene.particle_material.color, c);
    let tri_after: Vec<usize> = s.scene.meshes.iter().map(|m| m.data.triangle_count()).collect();
    assert_eq!(tri_before, tri_after);
    assert_eq!(points_before, s.scene.particles.positions);
}

#[test]
fn restart_after_pause_does_not_jump() {
    let mut s = state();
    let mut q = CommandQueue::new();
    let mut clock = FrameClock::new();
    s.update(&mut q, clock.tick(0.0));
    s.update(&mut q, clock.tick(0.5));
    let before = s.scene.meshes[0].rotation;
    // Loop stopped for a minute, then restarted.
    clock.reset();
    let dt = clock.tick(60.5);
    assert_eq!(dt, 0.0);
    s.update(&mut q, dt);
    assert_eq!(s.scene.meshes[0].rotation, before);
}
