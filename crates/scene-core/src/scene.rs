//! Static scene contents: section meshes, particle field, light and materials.
//!
//! The graph is built once. Afterwards only mesh rotations and the shared
//! material colour change; geometry is never rebuilt.

use crate::camera::CameraRig;
use crate::color::Rgb;
use crate::config::SceneConfig;
use crate::constants::{LIGHT_DIRECTION, LIGHT_INTENSITY, SECTION_MESH_X};
use crate::error::Result;
use crate::geometry::{MeshData, MeshKind};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;

/// Toon material shared by every section mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct ToonMaterial {
    pub color: Rgb,
    /// Number of bands in the procedural ramp used when no gradient image loads.
    pub gradient_steps: u32,
}

/// Material of the particle field.
#[derive(Clone, Debug, PartialEq)]
pub struct PointsMaterial {
    pub color: Rgb,
    pub size: f32,
    pub size_attenuation: bool,
}

impl PointsMaterial {
    /// Pixels per world unit at view depth 1: half the CSS viewport height,
    /// or 0 when points keep a fixed pixel size.
    pub fn attenuation_scale(&self, css_height: f64) -> f32 {
        if self.size_attenuation && css_height > 0.0 {
            (css_height * 0.5) as f32
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f32,
    /// Position of the light; it shines toward the origin.
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

/// One section mesh: shape, geometry and mutable transform.
#[derive(Clone, Debug)]
pub struct SectionMesh {
    pub kind: MeshKind,
    pub data: MeshData,
    pub position: Vec3,
    /// Euler angles (XYZ order) in radians.
    pub rotation: Vec3,
}

impl SectionMesh {
    pub fn model_matrix(&self) -> Mat4 {
        let r = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_rotation_translation(r, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
}

pub struct SceneGraph {
    pub meshes: Vec<SectionMesh>,
    pub particles: ParticleField,
    pub material: ToonMaterial,
    pub particle_material: PointsMaterial,
    pub light: DirectionalLight,
    pub rig: CameraRig,
    pub object_distance: f32,
}

impl SceneGraph {
    /// Build the scene with the particle RNG seeded from config (or entropy).
    pub fn build(config: &SceneConfig, aspect: f32) -> Result<Self> {
        let mut rng = match config.particle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build_with_rng(config, aspect, &mut rng)
    }

    pub fn build_with_rng<R: Rng + ?Sized>(
        config: &SceneConfig,
        aspect: f32,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let color = config.material_rgb()?;
        let distance = config.object_distance;

        let meshes: Vec<SectionMesh> = MeshKind::SECTION_SHAPES
            .iter()
            .zip(SECTION_MESH_X)
            .enumerate()
            .map(|(i, (kind, x))| SectionMesh {
                kind: *kind,
                data: kind.build(),
                position: Vec3::new(x, -distance * i as f32, 0.0),
                rotation: Vec3::ZERO,
            })
            .collect();

        let particles = ParticleField {
            positions: particle_positions(config.particle_count, distance, meshes.len(), rng),
        };

        log::info!(
            "[scene] meshes={} triangles={} particles={} color={}",
            meshes.len(),
            meshes.iter().map(|m| m.data.triangle_count()).sum::<usize>(),
            particles.positions.len(),
            color
        );

        Ok(Self {
            meshes,
            particles,
            material: ToonMaterial {
                color,
                gradient_steps: config.gradient_steps,
            },
            particle_material: PointsMaterial {
                color,
                size: config.particle_size,
                size_attenuation: true,
            },
            light: DirectionalLight {
                color: Rgb::WHITE,
                intensity: LIGHT_INTENSITY,
                position: Vec3::from(LIGHT_DIRECTION),
            },
            rig: CameraRig::new(aspect),
            object_distance: distance,
        })
    }

    pub fn section_count(&self) -> usize {
        self.meshes.len()
    }

    /// Recolour the toon material and the particle material together.
    pub fn set_material_color(&mut self, color: Rgb) {
        self.material.color = color;
        self.particle_material.color = color;
    }
}

/// Scatter points across the horizontal spread and the vertical span of all
/// sections, starting half a section above the first mesh.
pub fn particle_positions<R: Rng + ?Sized>(
    count: usize,
    object_distance: f32,
    sections: usize,
    rng: &mut R,
) -> Vec<Vec3> {
    let spread = crate::constants::PARTICLE_SPREAD;
    let span = object_distance * sections as f32;
    (0..count)
        .map(|_| {
            let x = (rng.gen::<f32>() - 0.5) * spread;
            let y = object_distance * 0.5 - rng.gen::<f32>() * span;
            let z = (rng.gen::<f32>() - 0.5) * spread;
            Vec3::new(x, y, z)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_scene() -> SceneGraph {
        let cfg = SceneConfig {
            particle_seed: Some(42),
            ..Default::default()
        };
        SceneGraph::build(&cfg, 16.0 / 9.0).unwrap()
    }

    #[test]
    fn meshes_are_stacked_and_alternate_sides() {
        let scene = seeded_scene();
        let positions: Vec<Vec3> = scene.meshes.iter().map(|m| m.position).collect();
        assert_eq!(
            positions,
            vec![
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(-2.0, -4.0, 0.0),
                Vec3::new(2.0, -8.0, 0.0)
            ]
        );
        assert!(scene.meshes.iter().all(|m| m.rotation == Vec3::ZERO));
    }

    #[test]
    fn particles_fill_the_section_span() {
        let scene = seeded_scene();
        assert_eq!(scene.particles.positions.len(), 200);
        for p in &scene.particles.positions {
            assert!(p.x >= -5.0 && p.x < 5.0);
            assert!(p.z >= -5.0 && p.z < 5.0);
            assert!(p.y <= 2.0 && p.y > 2.0 - 12.0);
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let a = seeded_scene();
        let b = seeded_scene();
        assert_eq!(a.particles.positions, b.particles.positions);
    }

    #[test]
    fn color_change_touches_both_materials_only() {
        let mut scene = seeded_scene();
        let before: Vec<usize> = scene.meshes.iter().map(|m| m.data.vertices.len()).collect();
        let particles_before = scene.particles.positions.clone();
        let c = Rgb::new(0x12, 0x34, 0x56);
        scene.set_material_color(c);
        assert_eq!(scene.material.color, c);
        assert_eq!(scene.particle_material.color, c);
        let after: Vec<usize> = scene.meshes.iter().map(|m| m.data.vertices.len()).collect();
        assert_eq!(before, after);
        assert_eq!(particles_before, scene.particles.positions);
    }

    #[test]
    fn point_scale_follows_css_height_not_backing_store() {
        let scene = seeded_scene();
        // Same CSS height at dpr 1 and dpr 2 gives the same scale.
        assert_eq!(scene.particle_material.attenuation_scale(900.0), 450.0);
        let fixed = PointsMaterial {
            size_attenuation: false,
            ..scene.particle_material.clone()
        };
        assert_eq!(fixed.attenuation_scale(900.0), 0.0);
        assert_eq!(scene.particle_material.attenuation_scale(0.0), 0.0);
    }

    #[test]
    fn light_points_from_upper_right() {
        let scene = seeded_scene();
        let d = scene.light.direction();
        assert!((d - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
        assert_eq!(scene.light.intensity, 3.0);
    }

    #[test]
    fn invalid_config_fails_to_build() {
        let cfg = SceneConfig {
            material_color: "nope".into(),
            ..Default::default()
        };
        assert!(SceneGraph::build(&cfg, 1.0).is_err());
    }
}
