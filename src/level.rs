//! Level layout files
//!
//! The world editor owns node placement. Layouts are exchanged as RON or
//! JSON and turned into a [`Navigator`] at session start.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::nav::{Navigator, NodeDescriptor, WaypointGraph};

/// Placed navigation data for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Level name
    pub name: String,
    /// Layout version for compatibility
    pub version: u32,
    /// All placed waypoints
    pub nodes: Vec<NodeDescriptor>,
    /// Escape polyline control points, in order
    #[serde(default)]
    pub escape_route: Vec<Vec3>,
}

impl LevelLayout {
    /// Create a new empty layout
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 1,
            nodes: Vec::new(),
            escape_route: Vec::new(),
        }
    }

    /// Add a node to the layout
    pub fn add_node(&mut self, node: NodeDescriptor) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    /// Set the escape polyline
    #[must_use]
    pub fn with_escape_route(mut self, points: Vec<Vec3>) -> Self {
        self.escape_route = points;
        self
    }

    /// Populate the waypoint graph and build the session navigator
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        log::info!("Loading level '{}' (v{})", self.name, self.version);
        Navigator::new(
            WaypointGraph::populate(&self.nodes),
            self.escape_route.clone(),
        )
    }

    /// Parse a layout from a RON string
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid layout
    pub fn from_ron_str(text: &str) -> Result<Self, LayoutError> {
        ron::from_str(text).map_err(|e| LayoutError::DeserializeError(e.to_string()))
    }

    /// Serialize the layout to a pretty RON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_ron_string(&self) -> Result<String, LayoutError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| LayoutError::SerializeError(e.to_string()))
    }

    /// Save the layout to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), LayoutError> {
        let ron_string = self.to_ron_string()?;
        fs::write(path, ron_string).map_err(|e| LayoutError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a layout from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let content = fs::read_to_string(path).map_err(|e| LayoutError::IoError(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save the layout to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), LayoutError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| LayoutError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a layout from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let content = fs::read_to_string(path).map_err(|e| LayoutError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| LayoutError::DeserializeError(e.to_string()))
    }

    /// Get the number of placed nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Errors that can occur during layout operations
#[derive(Debug, Clone)]
pub enum LayoutError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {}
