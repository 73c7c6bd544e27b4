//! Per-frame scene update.
//!
//! [`SceneState`] is the single context object the page drives: listeners
//! enqueue [`InputCommand`]s, and [`SceneState::update`] drains them, then
//! advances camera, idle spin and section tweens by the frame delta.

use crate::camera::CameraRig;
use crate::command::{CommandQueue, InputCommand};
use crate::config::SceneConfig;
use crate::constants::*;
use crate::error::Result;
use crate::input::{normalize_cursor, InputSamples, Viewport};
use crate::scene::SceneGraph;
use crate::section::{SectionChange, SectionTracker};
use crate::tween::{RotationTween, TweenSet};
use glam::{Vec2, Vec3};

/// What happened during one update, for logging and the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub commands: usize,
    pub section_changes: Vec<SectionChange>,
    /// Set when the drawing buffer must be resized to this physical size.
    pub resized_to: Option<(u32, u32)>,
    pub color_changed: bool,
}

pub struct SceneState {
    pub scene: SceneGraph,
    pub viewport: Viewport,
    pub input: InputSamples,
    pub sections: SectionTracker,
    pub tweens: TweenSet,
    camera_follows_scroll: bool,
    max_pixel_ratio: f64,
}

impl SceneState {
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Result<Self> {
        let scene = SceneGraph::build(config, viewport.aspect())?;
        Ok(Self::with_scene(config, scene, viewport))
    }

    pub fn with_scene(config: &SceneConfig, scene: SceneGraph, viewport: Viewport) -> Self {
        let sections = SectionTracker::new(scene.section_count());
        Self {
            scene,
            viewport,
            input: InputSamples::default(),
            sections,
            tweens: TweenSet::default(),
            camera_follows_scroll: config.camera_follows_scroll,
            max_pixel_ratio: config.max_pixel_ratio,
        }
    }

    pub fn rig(&self) -> &CameraRig {
        &self.scene.rig
    }

    /// Apply a single command. Scroll commands may start a section tween.
    pub fn apply(&mut self, cmd: InputCommand, report: &mut FrameReport) {
        match cmd {
            InputCommand::Resize {
                width,
                height,
                device_pixel_ratio,
            } => {
                self.viewport = Viewport::new(width, height, device_pixel_ratio, self.max_pixel_ratio);
                self.scene.rig.set_aspect(self.viewport.aspect());
                report.resized_to = Some(self.viewport.backing_size());
            }
            InputCommand::Scroll { offset_px } => {
                self.input.scroll_px = offset_px;
                if let Some(change) = self.sections.observe(offset_px, self.viewport.height) {
                    self.start_section_tween(change.to);
                    report.section_changes.push(change);
                }
            }
            InputCommand::PointerMove { client_x, client_y } => {
                self.input.cursor = normalize_cursor(client_x, client_y, &self.viewport);
            }
            InputCommand::SetMaterialColor(color) => {
                self.scene.set_material_color(color);
                report.color_changed = true;
            }
        }
    }

    fn start_section_tween(&mut self, section: usize) {
        self.tweens.start(RotationTween::new(
            section,
            Vec3::from(SECTION_TWEEN_DELTA),
            SECTION_TWEEN_DURATION_SEC,
        ));
    }

    /// Drain pending commands and advance the scene by `dt_sec`.
    pub fn update(&mut self, queue: &mut CommandQueue, dt_sec: f32) -> FrameReport {
        let mut report = FrameReport::default();
        for cmd in queue.drain() {
            report.commands += 1;
            self.apply(cmd, &mut report);
        }

        self.update_camera(dt_sec);

        for mesh in &mut self.scene.meshes {
            mesh.rotation.x += dt_sec * IDLE_SPIN_X;
            mesh.rotation.y += dt_sec * IDLE_SPIN_Y;
        }

        let mut rotations: Vec<Vec3> = self.scene.meshes.iter().map(|m| m.rotation).collect();
        self.tweens.advance(dt_sec, &mut rotations);
        for (mesh, rot) in self.scene.meshes.iter_mut().zip(rotations) {
            mesh.rotation = rot;
        }

        report
    }

    fn update_camera(&mut self, dt_sec: f32) {
        let rig = &mut self.scene.rig;
        if self.camera_follows_scroll && self.viewport.height > 0.0 {
            rig.camera_local.y = camera_scroll_y(
                self.input.scroll_px,
                self.viewport.height,
                self.scene.object_distance,
            );
        }
        let target = parallax_target(self.input.cursor);
        let step = (PARALLAX_DAMPING * dt_sec * PARALLAX_RATE_SCALE).min(1.0);
        rig.group_position.x += (target.x - rig.group_position.x) * step;
        rig.group_position.y += (target.y - rig.group_position.y) * step;
    }
}

/// Camera height for a scroll offset: one viewport of scroll moves the camera
/// down by one section spacing.
#[inline]
pub fn camera_scroll_y(scroll_px: f64, viewport_height: f64, object_distance: f32) -> f32 {
    (-scroll_px / viewport_height) as f32 * object_distance
}

/// Screen-space cursor to rig offset; y is flipped so moving the pointer up
/// moves the camera up.
#[inline]
pub fn parallax_target(cursor: Vec2) -> Vec2 {
    Vec2::new(cursor.x, -cursor.y)
}
