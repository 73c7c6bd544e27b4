//! Parametric triangle meshes for the three section shapes.
//!
//! Layouts follow the usual torus / cone / (p, q) torus-knot parameterisations
//! with one seam duplicated so UV-like grids close cleanly. Faces are emitted
//! counter-clockwise when seen from outside.

use glam::Vec3;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    #[inline]
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Shape of a section mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeshKind {
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
}

impl MeshKind {
    /// The three stock section shapes, top to bottom.
    pub const SECTION_SHAPES: [MeshKind; 3] = [
        MeshKind::Torus {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 16,
            tubular_segments: 60,
        },
        MeshKind::Cone {
            radius: 1.0,
            height: 2.0,
            radial_segments: 32,
            height_segments: 60,
        },
        MeshKind::TorusKnot {
            radius: 0.8,
            tube: 0.35,
            tubular_segments: 100,
            radial_segments: 16,
            p: 2,
            q: 3,
        },
    ];

    pub fn build(&self) -> MeshData {
        match *self {
            MeshKind::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(radius, tube, radial_segments, tubular_segments),
            MeshKind::Cone {
                radius,
                height,
                radial_segments,
                height_segments,
            } => cone(radius, height, radial_segments, height_segments),
            MeshKind::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => torus_knot(radius, tube, tubular_segments, radial_segments, p, q),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeshKind::Torus { .. } => "torus",
            MeshKind::Cone { .. } => "cone",
            MeshKind::TorusKnot { .. } => "torus_knot",
        }
    }
}

pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(2);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.vertices.push(MeshVertex::new(p, p - center));
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Cone with its apex at `+height / 2` and a closed base at `-height / 2`.
pub fn cone(radius: f32, height: f32, radial_segments: u32, height_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let rows = height_segments.max(1);
    let half = height * 0.5;
    let slope = radius / height;
    let mut mesh = MeshData::default();

    // Side: radius grows linearly from 0 at the apex to `radius` at the base.
    let mut grid = Vec::with_capacity(((rows + 1) * (radial + 1)) as usize);
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let r = v * radius;
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            let (s, c) = theta.sin_cos();
            grid.push(mesh.vertices.len() as u32);
            mesh.vertices.push(MeshVertex::new(
                Vec3::new(r * s, -v * height + half, r * c),
                Vec3::new(s, slope, c),
            ));
        }
    }
    let at = |y: u32, x: u32| grid[(y * (radial + 1) + x) as usize];
    for x in 0..radial {
        for y in 0..rows {
            let a = at(y, x);
            let b = at(y + 1, x);
            let c = at(y + 1, x + 1);
            let d = at(y, x + 1);
            // The apex row collapses to a point; skip its degenerate triangle.
            if y != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            mesh.indices.extend_from_slice(&[b, c, d]);
        }
    }

    // Base cap
    let down = Vec3::NEG_Y;
    let center_start = mesh.vertices.len() as u32;
    for _ in 0..radial {
        mesh.vertices
            .push(MeshVertex::new(Vec3::new(0.0, -half, 0.0), down));
    }
    let rim_start = mesh.vertices.len() as u32;
    for x in 0..=radial {
        let theta = x as f32 / radial as f32 * TAU;
        let (s, c) = theta.sin_cos();
        mesh.vertices
            .push(MeshVertex::new(Vec3::new(radius * s, -half, radius * c), down));
    }
    for x in 0..radial {
        let c = center_start + x;
        let i = rim_start + x;
        mesh.indices.extend_from_slice(&[i + 1, i, c]);
    }
    mesh
}

pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);
    let (p, q) = (p.max(1) as f32, q as f32);
    let curve = |u: f32| {
        let q_over_p = q / p * u;
        let cs = q_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * q_over_p.sin() * 0.5,
        )
    };

    let mut mesh = MeshData::default();
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);
        let t = p2 - p1;
        let b = t.cross(p2 + p1);
        let n = b.cross(t).normalize_or_zero();
        let b = b.normalize_or_zero();
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            mesh.vertices.push(MeshVertex::new(pos, pos - p1));
        }
    }
    let row = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(mesh: &MeshData) {
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        for v in &mesh.vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-3, "normal length {len}");
        }
    }

    #[test]
    fn torus_has_expected_grid() {
        let m = torus(1.0, 0.4, 16, 60);
        assert_eq!(m.vertices.len(), 17 * 61);
        assert_eq!(m.triangle_count(), 16 * 60 * 2);
        assert_well_formed(&m);
        // Every vertex lies within the tube around the ring.
        for v in &m.vertices {
            let p = Vec3::from(v.position);
            let ring_dist = (Vec3::new(p.x, p.y, 0.0).length() - 1.0).hypot(p.z);
            assert!((ring_dist - 0.4).abs() < 1e-4);
        }
    }

    #[test]
    fn cone_spans_height_and_closes_base() {
        let m = cone(1.0, 2.0, 32, 60);
        assert_well_formed(&m);
        let ys: Vec<f32> = m.vertices.iter().map(|v| v.position[1]).collect();
        let max = ys.iter().cloned().fold(f32::MIN, f32::max);
        let min = ys.iter().cloned().fold(f32::MAX, f32::min);
        assert!((max - 1.0).abs() < 1e-5);
        assert!((min + 1.0).abs() < 1e-5);
        // side: 32 apex triangles + 59 rows of quads; base: 32 triangles
        assert_eq!(m.triangle_count(), 32 + 32 * 59 * 2 + 32);
        let base_normals = m.vertices.iter().filter(|v| v.normal == [0.0, -1.0, 0.0]).count();
        assert_eq!(base_normals, 32 + 33);
    }

    #[test]
    fn torus_knot_stays_near_its_curve() {
        let m = torus_knot(0.8, 0.35, 100, 16, 2, 3);
        assert_eq!(m.vertices.len(), 101 * 17);
        assert_eq!(m.triangle_count(), 100 * 16 * 2);
        assert_well_formed(&m);
        let max_extent = m
            .vertices
            .iter()
            .map(|v| Vec3::from(v.position).length())
            .fold(0.0, f32::max);
        // (2 + 1) * 0.5 * radius + tube
        assert!(max_extent <= 0.8 * 1.5 + 0.35 + 1e-3);
    }

    #[test]
    fn section_shapes_build_in_order() {
        let labels: Vec<_> = MeshKind::SECTION_SHAPES.iter().map(|k| k.label()).collect();
        assert_eq!(labels, ["torus", "cone", "torus_knot"]);
        for kind in MeshKind::SECTION_SHAPES {
            assert!(kind.build().triangle_count() > 0);
        }
    }
}
