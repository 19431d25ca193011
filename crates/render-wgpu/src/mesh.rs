//! Shape tessellation into indexed triangle lists.
//!
//! Winding is counter-clockwise seen from outside, matching back-face culling.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use shoreline_scene::Shape;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    fn push(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.vertices.len() as u16;
        self.vertices.push(Vertex::new(position, normal));
        index
    }

    fn triangle(&mut self, a: u16, b: u16, c: u16) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}

pub(crate) fn tessellate(shape: &Shape) -> MeshData {
    match *shape {
        Shape::Plane { width, height } => plane(width, height),
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => cylinder(radius_top, radius_bottom, height, radial_segments),
        Shape::Cone {
            radius,
            height,
            radial_segments,
        } => cylinder(0.0, radius, height, radial_segments),
        Shape::Dodecahedron { radius } => dodecahedron(radius),
    }
}

fn plane(width: f32, height: f32) -> MeshData {
    let (w, h) = (width * 0.5, height * 0.5);
    let mut mesh = MeshData::default();
    let a = mesh.push(Vec3::new(-w, -h, 0.0), Vec3::Z);
    let b = mesh.push(Vec3::new(w, -h, 0.0), Vec3::Z);
    let c = mesh.push(Vec3::new(w, h, 0.0), Vec3::Z);
    let d = mesh.push(Vec3::new(-w, h, 0.0), Vec3::Z);
    mesh.triangle(a, b, c);
    mesh.triangle(c, d, a);
    mesh
}

/// Frustum along Y centered on the origin. A zero radius collapses that end
/// to a point and drops its cap, which is how cones are built.
fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };
    let mut mesh = MeshData::default();

    let mut bottom = Vec::with_capacity(segments as usize + 1);
    let mut top = Vec::with_capacity(segments as usize + 1);
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        let normal = Vec3::new(sin, slope, cos).normalize();
        bottom.push(mesh.push(Vec3::new(radius_bottom * sin, -half, radius_bottom * cos), normal));
        top.push(mesh.push(Vec3::new(radius_top * sin, half, radius_top * cos), normal));
    }
    for i in 0..segments as usize {
        let (a, b, c, d) = (bottom[i], bottom[i + 1], top[i + 1], top[i]);
        if radius_bottom > 0.0 {
            mesh.triangle(a, b, c);
        }
        if radius_top > 0.0 {
            mesh.triangle(a, c, d);
        }
    }

    if radius_top > 0.0 {
        cap(&mut mesh, radius_top, half, segments, true);
    }
    if radius_bottom > 0.0 {
        cap(&mut mesh, radius_bottom, -half, segments, false);
    }
    mesh
}

fn cap(mesh: &mut MeshData, radius: f32, y: f32, segments: u32, up: bool) {
    let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
    let center = mesh.push(Vec3::new(0.0, y, 0.0), normal);
    let first = mesh.vertices.len() as u16;
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.push(Vec3::new(radius * sin, y, radius * cos), normal);
    }
    for i in 0..segments as u16 {
        let (a, b) = (first + i, first + i + 1);
        if up {
            mesh.triangle(center, a, b);
        } else {
            mesh.triangle(center, b, a);
        }
    }
}

/// Flat-shaded dodecahedron: 12 pentagons, each fanned into 3 triangles with
/// its own face normal.
fn dodecahedron(radius: f32) -> MeshData {
    let phi = (1.0 + 5.0_f32.sqrt()) * 0.5;
    let inv = 1.0 / phi;

    let mut corners = Vec::with_capacity(20);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                corners.push(Vec3::new(x, y, z));
            }
        }
    }
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            corners.push(Vec3::new(0.0, a * inv, b * phi));
            corners.push(Vec3::new(a * inv, b * phi, 0.0));
            corners.push(Vec3::new(a * phi, 0.0, b * inv));
        }
    }
    let scale = radius / 3.0_f32.sqrt();

    // Face normals of a dodecahedron are the icosahedron's vertices.
    let mut normals = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            normals.push(Vec3::new(0.0, a * phi, b).normalize());
            normals.push(Vec3::new(a * phi, b, 0.0).normalize());
            normals.push(Vec3::new(a, 0.0, b * phi).normalize());
        }
    }

    let mut mesh = MeshData::default();
    for normal in normals {
        let reach = corners
            .iter()
            .map(|c| c.dot(normal))
            .fold(f32::MIN, f32::max);
        let mut face: Vec<Vec3> = corners
            .iter()
            .copied()
            .filter(|c| c.dot(normal) > reach - 1e-3)
            .collect();

        let center = face.iter().copied().sum::<Vec3>() / face.len() as f32;
        let u = (face[0] - center).normalize();
        let w = normal.cross(u);
        face.sort_by(|p, q| {
            let angle = |v: &Vec3| (*v - center).dot(w).atan2((*v - center).dot(u));
            angle(p).total_cmp(&angle(q))
        });

        let base = mesh.vertices.len() as u16;
        for corner in &face {
            mesh.push(*corner * scale, normal);
        }
        for i in 1..face.len() as u16 - 1 {
            mesh.triangle(base, base + i, base + i + 1);
        }
    }
    mesh
}
