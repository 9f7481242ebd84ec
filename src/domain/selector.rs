//! Root selection from the caller's filter specificity.

use itertools::Itertools;

use crate::domain::layer::Layer;

/// Filters a caller already knows; at most one value per layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub level: Option<String>,
    pub topic: Option<String>,
    pub subtopic: Option<String>,
}

impl Filters {
    pub fn new(level: Option<String>, topic: Option<String>, subtopic: Option<String>) -> Self {
        Self {
            level: clean(level),
            topic: clean(topic),
            subtopic: clean(subtopic),
        }
    }

    pub fn level(&self) -> Option<&str> {
        present(&self.level)
    }

    pub fn topic(&self) -> Option<&str> {
        present(&self.topic)
    }

    pub fn subtopic(&self) -> Option<&str> {
        present(&self.subtopic)
    }

    /// Filter value for `layer`, if one is set.
    pub fn get(&self, layer: Layer) -> Option<&str> {
        match layer {
            Layer::Level => self.level(),
            Layer::Topic => self.topic(),
            Layer::SubTopic => self.subtopic(),
        }
    }

    pub fn has_filters(&self) -> bool {
        Layer::ORDER.iter().any(|&l| self.get(l).is_some())
    }

    /// Most specific layer with a filter value; `Level` when none is set.
    pub fn primary(&self) -> Layer {
        if self.subtopic().is_some() {
            Layer::SubTopic
        } else if self.topic().is_some() {
            Layer::Topic
        } else {
            Layer::Level
        }
    }

    /// Set filter values, most specific first (`"Büro + Home + A1"`).
    pub fn describe(&self) -> String {
        [self.subtopic(), self.topic(), self.level()]
            .into_iter()
            .flatten()
            .join(" + ")
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
