//! Z-ordered SVG output.
//!
//! Renderers tag every element with a [`RenderLayer`]. [`LayeredOutput`]
//! keeps one bucket per layer and emits them bottom to top, each wrapped in
//! a `<g data-layer="...">` group:
//!
//! ```
//! # use hyperplot_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Circle, Text};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Label, Box::new(Text::new("v0")));
//! output.add_to_layer(RenderLayer::Vertex, Box::new(Circle::new()));
//!
//! let groups = output.render();
//! assert!(groups[0].to_string().contains("data-layer=\"vertex\""));
//! ```

use std::collections::BTreeMap;

use svg::node::element::Group;

pub type SvgNode = Box<dyn svg::Node>;

/// Drawing layers, declared bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Background,
    /// Filled hyperedge hulls.
    Hull,
    /// Edge lines, self-loops and arrow heads.
    Edge,
    Vertex,
    Label,
}

impl RenderLayer {
    /// Value of the `data-layer` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Hull => "hull",
            Self::Edge => "edge",
            Self::Vertex => "vertex",
            Self::Label => "label",
        }
    }
}

/// SVG nodes bucketed by layer. Within a layer, nodes keep insertion order.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    layers: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.layers.entry(layer).or_default().push(node);
    }

    /// Appends every node of `other` after the nodes already in each layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.layers {
            self.layers.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(Vec::is_empty)
    }

    /// Number of nodes in `layer`.
    pub fn layer_len(&self, layer: RenderLayer) -> usize {
        self.layers.get(&layer).map_or(0, Vec::len)
    }

    /// One `<g>` per non-empty layer, bottom layer first.
    pub fn render(self) -> Vec<SvgNode> {
        self.layers
            .into_iter()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(layer, nodes)| {
                let group = nodes
                    .into_iter()
                    .fold(Group::new().set("data-layer", layer.name()), |group, node| {
                        group.add(node)
                    });
                Box::new(group) as SvgNode
            })
            .collect()
    }
}
