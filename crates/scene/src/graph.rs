use crate::node::{Blueprint, Node, NodeId, NodeKind};
use glam::Mat4;
use shoreline_common::Transform;

/// Mutable arena used while a scene is being composed.
///
/// Nodes are appended parent-before-child, so a forward pass over the arena
/// always visits a parent before any of its descendants.
#[derive(Debug)]
pub struct SceneGraphBuilder {
    nodes: Vec<Node>,
}

impl Default for SceneGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraphBuilder {
    /// Start a graph holding only the root group.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "scene".into(),
                transform: Transform::default(),
                kind: NodeKind::Group,
                cast_shadow: false,
                receive_shadow: false,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Flatten `blueprint` under `parent`. Returns the id of the blueprint root.
    pub fn attach(&mut self, parent: NodeId, blueprint: Blueprint) -> NodeId {
        let Blueprint {
            name,
            transform,
            kind,
            cast_shadow,
            receive_shadow,
            children,
        } = blueprint;

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name,
            transform,
            kind,
            cast_shadow,
            receive_shadow,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);

        for child in children {
            self.attach(id, child);
        }
        id
    }

    /// Freeze the topology.
    pub fn finish(self) -> SceneGraph {
        SceneGraph { nodes: self.nodes }
    }
}

/// Frozen scene graph.
///
/// Topology cannot change after [`SceneGraphBuilder::finish`]; only local
/// transforms and light intensities are writable.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in parent-before-child order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// First node with the given name, in arena order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.index()).map(|node| &mut node.transform)
    }

    /// Intensity of a light node. `None` for any other node kind.
    pub fn intensity_mut(&mut self, id: NodeId) -> Option<&mut f32> {
        match self.nodes.get_mut(id.index()).map(|node| &mut node.kind) {
            Some(NodeKind::Light(light)) => Some(&mut light.intensity),
            _ => None,
        }
    }

    /// Local-to-world matrix of a single node.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = self.get(id);
        while let Some(node) = cursor {
            matrix = node.transform.matrix() * matrix;
            cursor = node.parent.and_then(|p| self.get(p));
        }
        matrix
    }

    /// Local-to-world matrices for every node, indexed by [`NodeId::index`].
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut out: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.matrix();
            let world = match node.parent {
                Some(parent) => out[parent.index()] * local,
                None => local,
            };
            out.push(world);
        }
        out
    }

    /// Rebuild the owned description of the subtree rooted at `id`.
    pub fn blueprint(&self, id: NodeId) -> Option<Blueprint> {
        let node = self.get(id)?;
        Some(Blueprint {
            name: node.name.clone(),
            transform: node.transform,
            kind: node.kind.clone(),
            cast_shadow: node.cast_shadow,
            receive_shadow: node.receive_shadow,
            children: node
                .children
                .iter()
                .filter_map(|child| self.blueprint(*child))
                .collect(),
        })
    }

    /// Deterministic hash over structure, names, transforms and light intensities.
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for (id, node) in self.iter() {
            mix(&mut h, &id.0.to_le_bytes());
            mix(&mut h, node.name.as_bytes());
            let parent = node.parent.map_or(u32::MAX, |p| p.0);
            mix(&mut h, &parent.to_le_bytes());
            let t = &node.transform;
            for v in [t.position, t.rotation, t.scale] {
                for c in v.to_array() {
                    mix(&mut h, &c.to_le_bytes());
                }
            }
            match &node.kind {
                NodeKind::Group => mix(&mut h, b"g"),
                NodeKind::Mesh(mesh) => {
                    mix(&mut h, b"m");
                    mix(&mut h, mesh.geometry.kind_name().as_bytes());
                }
                NodeKind::Light(light) => {
                    mix(&mut h, b"l");
                    mix(&mut h, &light.intensity.to_le_bytes());
                }
            }
            mix(&mut h, &[node.cast_shadow as u8, node.receive_shadow as u8]);
        }
        h
    }
}
