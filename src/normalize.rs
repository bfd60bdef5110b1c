//! Dataset normalization: raw records to the immutable display model.

use std::collections::HashSet;

use log::info;

use crate::config::EncodingConfig;
use crate::dataset::{Dataset, RawEdge, RawNode, Sentiment};
use crate::encoding::{
	ColorCategory, EdgeColors, NodeColors, edge_colors, node_color_category, node_colors,
	node_size_value,
};
use crate::error::{GraphError, Result};

/// A node enriched with its precomputed visual encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNode {
	/// The record as loaded.
	pub raw: RawNode,
	/// `connections` capped for sizing.
	pub size_value: u32,
	/// Bucket driving the palette.
	pub color_category: ColorCategory,
	/// Fill and outline colors per state.
	pub colors: NodeColors,
	/// Tooltip text.
	pub title: String,
}

impl DisplayNode {
	/// Unique node id.
	pub fn id(&self) -> &str {
		&self.raw.id
	}

	/// Display name.
	pub fn label(&self) -> &str {
		&self.raw.label
	}

	/// Total degree, uncapped.
	pub fn connections(&self) -> u32 {
		self.raw.connections
	}
}

/// An edge enriched with identity and state colors.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayEdge {
	/// Position in the input sequence; edges have no natural id.
	pub index: usize,
	/// The record as loaded.
	pub raw: RawEdge,
	/// `comment_sentiment` parsed, `None` for unrecognised labels.
	pub comment: Option<Sentiment>,
	/// Rest, hover and highlight colors.
	pub colors: EdgeColors,
	/// Tooltip text (the description, or empty).
	pub title: String,
}

impl DisplayEdge {
	/// Source node id.
	pub fn from(&self) -> &str {
		&self.raw.from
	}

	/// Target node id.
	pub fn to(&self) -> &str {
		&self.raw.to
	}

	/// Platform name, empty when unknown.
	pub fn platform(&self) -> &str {
		&self.raw.platform
	}
}

/// The full, never-mutated display model built once per loaded dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayModel {
	/// Nodes in input order.
	pub nodes: Vec<DisplayNode>,
	/// Edges in input order; `edges[i].index == i`.
	pub edges: Vec<DisplayEdge>,
	/// Platform filter choices from `stats.platforms`.
	pub platforms: Vec<String>,
}

impl DisplayModel {
	/// Largest `connections` value, 0 for an empty model.
	pub fn max_connections(&self) -> u32 {
		self.nodes.iter().map(DisplayNode::connections).max().unwrap_or(0)
	}

	/// Find a node by id.
	pub fn node(&self, id: &str) -> Option<&DisplayNode> {
		self.nodes.iter().find(|n| n.id() == id)
	}
}

/// Normalize with the default encoding parameters.
pub fn normalize(dataset: &Dataset) -> Result<DisplayModel> {
	normalize_with(dataset, &EncodingConfig::default())
}

/// Build the display model, rejecting the dataset if an edge references an
/// unknown node or a node id is repeated.
pub fn normalize_with(dataset: &Dataset, config: &EncodingConfig) -> Result<DisplayModel> {
	let mut ids: HashSet<&str> = HashSet::with_capacity(dataset.nodes.len());
	for node in &dataset.nodes {
		if !ids.insert(node.id.as_str()) {
			return Err(GraphError::DuplicateNode(node.id.clone()));
		}
	}

	for (edge_index, edge) in dataset.edges.iter().enumerate() {
		for endpoint in [&edge.from, &edge.to] {
			if !ids.contains(endpoint.as_str()) {
				return Err(GraphError::UnknownNode {
					edge_index,
					node_id: endpoint.clone(),
				});
			}
		}
	}

	let nodes = dataset
		.nodes
		.iter()
		.map(|raw| {
			let color_category = node_color_category(&raw.sentiments);
			DisplayNode {
				size_value: node_size_value(raw.connections, config.node_size_cap),
				color_category,
				colors: node_colors(color_category),
				title: format!("{}\nConnections: {}", raw.label, raw.connections),
				raw: raw.clone(),
			}
		})
		.collect::<Vec<_>>();

	let edges = dataset
		.edges
		.iter()
		.enumerate()
		.map(|(index, raw)| DisplayEdge {
			index,
			comment: Sentiment::parse(&raw.comment_sentiment),
			colors: edge_colors(&raw.comment_sentiment, &config.edge_opacity),
			title: raw.description.clone().unwrap_or_default(),
			raw: raw.clone(),
		})
		.collect::<Vec<_>>();

	info!(
		"sentiment-graph: normalized {} nodes, {} edges, {} platforms",
		nodes.len(),
		edges.len(),
		dataset.stats.platforms.len()
	);

	Ok(DisplayModel {
		nodes,
		edges,
		platforms: dataset.stats.platforms.clone(),
	})
}
