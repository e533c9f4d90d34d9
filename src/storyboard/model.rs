use std::collections::HashSet;
use std::path::Path;

use anyhow::Context as _;

use crate::assets::paths::normalize_rel_path;
use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Accent category of a diagram node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    System,
    Risk,
    Artifact,
}

/// A labelled box placed at normalized canvas coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    /// Horizontal center, `0..=1` of canvas width.
    pub x: f64,
    /// Vertical center, `0..=1` of canvas height.
    pub y: f64,
}

impl DiagramNode {
    pub fn kind_or_default(&self) -> NodeKind {
        self.kind.unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DiagramEdge {
    /// Caption text: the label when present and non-empty, otherwise `from→to`.
    pub fn caption(&self) -> String {
        match self.label.as_deref() {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => format!("{}→{}", self.from, self.to),
        }
    }
}

/// Visual payload of a segment, tagged by `type`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Visual {
    Title {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    Diagram {
        nodes: Vec<DiagramNode>,
        #[serde(default)]
        edges: Vec<DiagramEdge>,
    },
    Artifact {
        heading: String,
        body: String,
    },
}

impl Visual {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Diagram { .. } => "diagram",
            Self::Artifact { .. } => "artifact",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub title: String,
    pub narration: String,
    pub visual: Visual,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Storyboard {
    pub title: String,
    pub segments: Vec<Segment>,
}

/// Root input of the composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputProps {
    pub storyboard: Storyboard,
    /// Narration audio path relative to the public directory, e.g. `"/narration.mp3"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_src: Option<String>,
}

impl InputProps {
    pub fn from_json_str(s: &str) -> StoryreelResult<Self> {
        let props: Self = serde_json::from_str(s)?;
        props.validate()?;
        Ok(props)
    }

    pub fn from_path(path: impl AsRef<Path>) -> StoryreelResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read input props '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> StoryreelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> StoryreelResult<()> {
        if self.storyboard.title.trim().is_empty() {
            return Err(StoryreelError::validation(
                "storyboard title must be non-empty",
            ));
        }

        if let Some(src) = &self.audio_src {
            let trimmed = src.trim();
            normalize_rel_path(trimmed.strip_prefix('/').unwrap_or(trimmed)).map_err(|e| {
                StoryreelError::validation(format!("audioSrc '{src}' is not a public path: {e}"))
            })?;
        }

        for (idx, seg) in self.storyboard.segments.iter().enumerate() {
            if let Visual::Diagram { nodes, edges } = &seg.visual {
                validate_diagram(idx, nodes, edges)?;
            }
        }
        Ok(())
    }
}

fn validate_diagram(
    seg_idx: usize,
    nodes: &[DiagramNode],
    edges: &[DiagramEdge],
) -> StoryreelResult<()> {
    let mut ids = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(StoryreelError::validation(format!(
                "segment {seg_idx}: duplicate diagram node id '{}'",
                node.id
            )));
        }
        for (axis, v) in [("x", node.x), ("y", node.y)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(StoryreelError::validation(format!(
                    "segment {seg_idx}: node '{}' {axis}={v} is outside 0..=1",
                    node.id
                )));
            }
        }
    }

    for edge in edges {
        for end in [&edge.from, &edge.to] {
            if !ids.contains(end.as_str()) {
                tracing::warn!(
                    segment = seg_idx,
                    from = %edge.from,
                    to = %edge.to,
                    "diagram edge references unknown node '{end}'"
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/model.rs"]
mod tests;
