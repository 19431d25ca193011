use crate::atmosphere::Atmosphere;
use crate::graph::SceneGraph;
use crate::node::NodeId;

/// Number of orbiting point lights in the diorama.
pub const FIREFLY_COUNT: usize = 3;

/// Ids of the nodes that the animation loop and the debug surface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    pub ambient: NodeId,
    pub sun: NodeId,
    pub hemisphere: NodeId,
    pub ground: NodeId,
    pub water: NodeId,
    pub palm_trees: NodeId,
    pub rocks: NodeId,
    pub umbrellas: NodeId,
    pub fireflies: [NodeId; FIREFLY_COUNT],
}

/// A fully assembled diorama: graph, atmosphere and well-known node ids.
#[derive(Debug, Clone)]
pub struct Scene {
    pub graph: SceneGraph,
    pub atmosphere: Atmosphere,
    pub handles: SceneHandles,
}

impl Scene {
    /// Palm tree groups in planting order.
    pub fn palm_trees(&self) -> &[NodeId] {
        self.graph.children(self.handles.palm_trees)
    }

    pub fn rocks(&self) -> &[NodeId] {
        self.graph.children(self.handles.rocks)
    }

    pub fn umbrellas(&self) -> &[NodeId] {
        self.graph.children(self.handles.umbrellas)
    }
}
