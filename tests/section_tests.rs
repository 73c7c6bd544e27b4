// Host-side tests for scroll-to-section tracking and the tweens it starts.

use scene_core::*;

fn state() -> SceneState {
    let cfg = SceneConfig {
        particle_seed: Some(11),
        ..Default::default()
    };
    SceneState::new(&cfg, Viewport::new(1200.0, 800.0, 1.0, 2.0)).unwrap()
}

#[test]
fn candidate_matches_rounded_ratio() {
    for h in [1.0, 600.0, 777.5, 1080.0] {
        let mut s = 0.0;
        while s < h * 5.0 {
            assert_eq!(candidate_section(s, h), Some((s / h).round() as i64));
            s += h / 7.0;
        }
    }
}

#[test]
fn one_tween_per_change_and_none_for_noops() {
    let mut s = state();
    let mut q = CommandQueue::new();
    // Small scrolls inside section 0: no tween.
    for offset in [0.0, 50.0, 100.0, 399.0] {
        q.push(InputCommand::Scroll { offset_px: offset });
    }
    let report = s.update(&mut q, 0.016);
    assert!(report.section_changes.is_empty());
    assert!(s.tweens.is_empty());

    // Cross into section 1, then wiggle inside it.
    for offset in [401.0, 500.0, 700.0, 1100.0] {
        q.push(InputCommand::Scroll { offset_px: offset });
    }
    let report = s.update(&mut q, 0.016);
    assert_eq!(report.section_changes, vec![SectionChange { from: 0, to: 1 }]);
    assert_eq!(s.tweens.len(), 1);
}

#[test]
fn rapid_scroll_stacks_tweens() {
    let mut s = state();
    let mut q = CommandQueue::new();
    for offset in [800.0, 0.0, 800.0, 1600.0] {
        q.push(InputCommand::Scroll { offset_px: offset });
    }
    let report = s.update(&mut q, 0.0);
    assert_eq!(report.section_changes.len(), 4);
    assert_eq!(s.tweens.len(), 4);
    assert_eq!(s.sections.current(), 2);
}

#[test]
fn overscroll_never_leaves_mesh_range() {
    let mut s = state();
    let mut q = CommandQueue::new();
    q.push(InputCommand::Scroll {
        offset_px: 800.0 * 40.0,
    });
    q.push(InputCommand::Scroll {
        offset_px: 800.0 * 41.0,
    });
    let report = s.update(&mut q, 0.0);
    assert_eq!(report.section_changes, vec![SectionChange { from: 0, to: 2 }]);
    for _ in 0..30 {
        s.update(&mut q, 0.1);
    }
    assert!(s.tweens.is_empty());
}

#[test]
fn finished_tween_adds_full_rotation_to_its_mesh() {
    let mut s = state();
    let mut q = CommandQueue::new();
    q.push(InputCommand::Scroll { offset_px: 1600.0 });
    for _ in 0..100 {
        s.update(&mut q, 1.0 / 60.0);
    }
    let spin = s.scene.meshes[0].rotation;
    let knot = s.scene.meshes[2].rotation;
    let extra = knot - spin;
    assert!((extra.x - 6.0).abs() < 1e-3);
    assert!((extra.y - 3.0).abs() < 1e-3);
    assert!((extra.z - 1.5).abs() < 1e-3);
}
