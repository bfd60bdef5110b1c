//! Command interface over a loaded display model.
//!
//! A [`GraphSession`] is built once per dataset and never mutated; the UI calls
//! its commands from whatever event dispatch it uses.

use log::info;

use crate::config::EncodingConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::{FilterPredicate, Subgraph, filter_model};
use crate::normalize::{DisplayModel, normalize_with};

/// Inspection record for a selected node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
	/// Display name.
	pub label: String,
	/// Total connections, uncapped.
	pub connections: u32,
	/// Comma-joined platforms, or `"N/A"`.
	pub platforms: String,
	/// Positive comments received.
	pub positive: u32,
	/// Negative comments received.
	pub negative: u32,
	/// Neutral comments received.
	pub neutral: u32,
}

/// Owns the display model and answers UI commands against it.
#[derive(Debug)]
pub struct GraphSession {
	model: DisplayModel,
	slider_cap: u32,
}

impl GraphSession {
	/// Normalize `dataset` into a session. Fails on integrity violations.
	pub fn new(dataset: &Dataset, encoding: &EncodingConfig, slider_cap: u32) -> Result<Self> {
		let model = normalize_with(dataset, encoding)?;
		info!(
			"sentiment-graph: session ready ({} nodes, {} edges)",
			model.nodes.len(),
			model.edges.len()
		);
		Ok(Self { model, slider_cap })
	}

	/// Wrap an already-normalized model.
	pub fn from_model(model: DisplayModel, slider_cap: u32) -> Self {
		Self { model, slider_cap }
	}

	/// The full display model.
	pub fn model(&self) -> &DisplayModel {
		&self.model
	}

	/// Recompute the visible subgraph for a new predicate.
	pub fn on_predicate_changed(&self, predicate: &FilterPredicate) -> Subgraph {
		filter_model(&self.model, predicate)
	}

	/// Subgraph for the reset predicate: the whole model.
	pub fn on_reset(&self) -> Subgraph {
		self.on_predicate_changed(&FilterPredicate::reset())
	}

	/// Inspection record for `id`, or `None` if no such node exists.
	pub fn on_node_selected(&self, id: &str) -> Option<NodeInfo> {
		let node = self.model.node(id)?;
		let raw = &node.raw;
		let platforms = if raw.platforms.is_empty() {
			"N/A".to_string()
		} else {
			raw.platforms.join(", ")
		};
		Some(NodeInfo {
			label: raw.label.clone(),
			connections: raw.connections,
			platforms,
			positive: raw.sentiments.positive,
			negative: raw.sentiments.negative,
			neutral: raw.sentiments.neutral,
		})
	}

	/// Platform filter choices.
	pub fn platforms(&self) -> &[String] {
		&self.model.platforms
	}

	/// Upper end of the min-connections slider: the largest degree, capped.
	pub fn connections_slider_max(&self) -> u32 {
		self.model.max_connections().clamp(1, self.slider_cap.max(1))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::{DatasetStats, RawEdge, RawNode, SentimentTally};

	fn session() -> GraphSession {
		let dataset = Dataset {
			nodes: vec![
				RawNode {
					id: "a".into(),
					label: "Alice".into(),
					connections: 240,
					platforms: vec!["Twitter".into(), "Reddit".into()],
					sentiments: SentimentTally {
						positive: 3,
						negative: 1,
						neutral: 2,
					},
				},
				RawNode {
					id: "b".into(),
					label: "Bob".into(),
					connections: 1,
					platforms: vec![],
					sentiments: SentimentTally::default(),
				},
			],
			edges: vec![RawEdge {
				from: "a".into(),
				to: "b".into(),
				description: Some("mention".into()),
				platform: "Twitter".into(),
				post_sentiment: "neutral".into(),
				comment_sentiment: "positive".into(),
				post_link: None,
				comment_index: None,
			}],
			stats: DatasetStats {
				platforms: vec!["Twitter".into(), "Reddit".into()],
				..Default::default()
			},
		};
		GraphSession::new(&dataset, &EncodingConfig::default(), 100).unwrap()
	}

	#[test]
	fn node_info_joins_platforms() {
		let info = session().on_node_selected("a").unwrap();
		assert_eq!(info.label, "Alice");
		assert_eq!(info.connections, 240);
		assert_eq!(info.platforms, "Twitter, Reddit");
		assert_eq!((info.positive, info.negative, info.neutral), (3, 1, 2));
	}

	#[test]
	fn node_info_without_platforms_is_na() {
		assert_eq!(session().on_node_selected("b").unwrap().platforms, "N/A");
		assert_eq!(session().on_node_selected("nobody"), None);
	}

	#[test]
	fn reset_is_the_full_model() {
		let s = session();
		let sub = s.on_reset();
		assert_eq!(sub.nodes, s.model().nodes);
		assert_eq!(sub.edges, s.model().edges);
	}

	#[test]
	fn slider_max_is_capped() {
		let s = session();
		assert_eq!(s.connections_slider_max(), 100);
		assert_eq!(s.platforms().len(), 2);
		assert_eq!(GraphSession::from_model(DisplayModel::default(), 100).connections_slider_max(), 1);
	}
}
