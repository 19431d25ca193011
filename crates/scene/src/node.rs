use crate::light::Light;
use glam::Vec3;
use shoreline_common::{Color, Transform};
use std::sync::Arc;

/// Index of a node inside a [`crate::SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parametric geometry. Dimensions are in local units around the node origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Flat rectangle in the local XY plane, facing +Z.
    Plane { width: f32, height: f32 },
    /// Capped cylinder along Y, centered on the origin.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Cone along Y with its base at `-height / 2` and apex at `+height / 2`.
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Regular dodecahedron inscribed in a sphere of `radius`.
    Dodecahedron { radius: f32 },
}

impl Shape {
    /// Local bounding sphere as `(center, radius)`.
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        let radius = match *self {
            Shape::Plane { width, height } => 0.5 * (width * width + height * height).sqrt(),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let r = radius_top.max(radius_bottom);
                (r * r + 0.25 * height * height).sqrt()
            }
            Shape::Cone { radius, height, .. } => (radius * radius + 0.25 * height * height).sqrt(),
            Shape::Dodecahedron { radius } => radius,
        };
        (Vec3::ZERO, radius)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Plane { .. } => "plane",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Cone { .. } => "cone",
            Shape::Dodecahedron { .. } => "dodecahedron",
        }
    }
}

/// Standard surface description.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    /// Below 1.0 the surface is drawn in the blended pass.
    pub opacity: f32,
}

impl Surface {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Shape and surface pair. Both sit behind `Arc` so many nodes can share one
/// instance; neither can be mutated once shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: Arc<Shape>,
    pub surface: Arc<Surface>,
}

impl Mesh {
    pub fn new(geometry: Shape, surface: Surface) -> Self {
        Self {
            geometry: Arc::new(geometry),
            surface: Arc::new(surface),
        }
    }

    pub fn shared(geometry: &Arc<Shape>, surface: &Arc<Surface>) -> Self {
        Self {
            geometry: Arc::clone(geometry),
            surface: Arc::clone(surface),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
    Light(Light),
}

/// A node stored in a frozen scene graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) kind: NodeKind,
    pub(crate) cast_shadow: bool,
    pub(crate) receive_shadow: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn light(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn cast_shadow(&self) -> bool {
        self.cast_shadow
    }

    pub fn receive_shadow(&self) -> bool {
        self.receive_shadow
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Owned, self-contained description of a subtree.
///
/// Entity builders return blueprints; the graph builder flattens them into the
/// arena. Equality is structural: shapes and surfaces compare by value, not by
/// `Arc` identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub children: Vec<Blueprint>,
}

impl Blueprint {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind,
            cast_shadow: false,
            receive_shadow: false,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::with_kind(name, NodeKind::Mesh(mesh))
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::with_kind(name, NodeKind::Light(light))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }

    pub fn with_child(mut self, child: Blueprint) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including the root.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Blueprint::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cone_bounding_sphere_reaches_base_rim() {
        let cone = Shape::Cone {
            radius: 3.0,
            height: 8.0,
            radial_segments: 8,
        };
        let (center, radius) = cone.bounding_sphere();
        assert_eq!(center, Vec3::ZERO);
        assert_eq!(radius, 5.0);
    }

    #[test]
    fn opacity_below_one_is_transparent() {
        let water = Surface::new(Color::from_hex(0x1e90ff)).with_opacity(0.9);
        assert!(water.is_transparent());
        assert!(!Surface::new(Color::WHITE).is_transparent());
    }

    #[test]
    fn blueprint_equality_ignores_arc_identity() {
        let a = Blueprint::mesh(
            "rock",
            Mesh::new(Shape::Dodecahedron { radius: 0.5 }, Surface::new(Color::WHITE)),
        );
        let b = Blueprint::mesh(
            "rock",
            Mesh::new(Shape::Dodecahedron { radius: 0.5 }, Surface::new(Color::WHITE)),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn node_count_includes_descendants() {
        let tree = Blueprint::group("root")
            .with_child(Blueprint::group("a").with_child(Blueprint::group("a1")))
            .with_child(Blueprint::group("b"));
        assert_eq!(tree.node_count(), 4);
    }
}
