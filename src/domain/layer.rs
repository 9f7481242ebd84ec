//! Grouping layers above the part-of-speech level.

use std::fmt;

use tracing::debug;

use crate::domain::entities::{Binding, NodeType};

/// One categorical grouping layer, broadest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Level,
    Topic,
    SubTopic,
}

impl Layer {
    /// Fixed top-down order of the grouping layers.
    pub const ORDER: [Layer; 3] = [Layer::Level, Layer::Topic, Layer::SubTopic];

    /// Resolve a caller-supplied primary name.
    ///
    /// Unknown names fall back to `Level`, i.e. the full layer order.
    pub fn from_primary(name: &str) -> Layer {
        match Self::parse(name) {
            Some(layer) => layer,
            None => {
                debug!(primary = name, "unknown primary layer, using full order");
                Layer::Level
            }
        }
    }

    /// Strict parse of a layer name.
    pub fn parse(name: &str) -> Option<Layer> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("level") {
            Some(Layer::Level)
        } else if name.eq_ignore_ascii_case("topic") {
            Some(Layer::Topic)
        } else if name.eq_ignore_ascii_case("subtopic") || name.eq_ignore_ascii_case("sub_topic")
        {
            Some(Layer::SubTopic)
        } else {
            None
        }
    }

    /// Effective layer list when the tree starts at `self`.
    pub fn suffix(self) -> &'static [Layer] {
        let start = Self::ORDER
            .iter()
            .position(|&l| l == self)
            .unwrap_or_default();
        &Self::ORDER[start..]
    }

    /// Placeholder used when a binding has no value for this layer.
    pub fn default_value(self) -> &'static str {
        match self {
            Layer::Level => "Unknown",
            Layer::Topic => "General",
            Layer::SubTopic => "Other",
        }
    }

    pub fn node_type(self) -> NodeType {
        match self {
            Layer::Level => NodeType::Level,
            Layer::Topic => NodeType::Category,
            Layer::SubTopic => NodeType::Subcategory,
        }
    }

    /// Raw field value of `binding` for this layer.
    pub fn field(self, binding: &Binding) -> Option<&str> {
        match self {
            Layer::Level => binding.level.as_deref(),
            Layer::Topic => binding.topic.as_deref(),
            Layer::SubTopic => binding.sub_topic.as_deref(),
        }
    }

    /// Field value with the layer default substituted when absent.
    pub fn value_of(self, binding: &Binding) -> &str {
        self.field(binding).unwrap_or(self.default_value())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Level => "level",
            Layer::Topic => "topic",
            Layer::SubTopic => "subtopic",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
