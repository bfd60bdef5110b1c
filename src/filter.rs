//! Filter engine: derives the visible subgraph from the display model and a predicate.
//!
//! Edges decide node membership. An edge passes on platform and comment
//! sentiment; a node is only eligible if some passing edge touches it, and
//! then additionally has to meet the connection threshold and search text.
//!
//! Passing edges are not re-checked against the final node set, so an edge
//! may reference a node that the threshold or search removed. Renderers must
//! tolerate such dangling edges.

use std::collections::HashSet;

use log::debug;

use crate::dataset::Sentiment;
use crate::normalize::{DisplayEdge, DisplayModel, DisplayNode};

/// Platform constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlatformChoice {
	/// No constraint.
	#[default]
	All,
	/// Only edges on this exact platform.
	Only(String),
}

impl PlatformChoice {
	/// Value used by the platform `<select>`.
	pub const ALL_VALUE: &'static str = "all";

	/// Interpret a raw select value.
	pub fn from_value(value: &str) -> Self {
		if value == Self::ALL_VALUE {
			Self::All
		} else {
			Self::Only(value.to_string())
		}
	}

	/// Inverse of [`PlatformChoice::from_value`].
	pub fn as_value(&self) -> &str {
		match self {
			Self::All => Self::ALL_VALUE,
			Self::Only(p) => p,
		}
	}

	fn admits(&self, platform: &str) -> bool {
		match self {
			Self::All => true,
			Self::Only(p) => p == platform,
		}
	}
}

/// Comment sentiment constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SentimentChoice {
	/// No constraint.
	#[default]
	All,
	/// Only edges whose comment sentiment is this one.
	Only(Sentiment),
}

impl SentimentChoice {
	/// Interpret a raw select value; unknown values mean no constraint.
	pub fn from_value(value: &str) -> Self {
		Sentiment::parse(value).map_or(Self::All, Self::Only)
	}

	/// Value used by the sentiment `<select>`.
	pub fn as_value(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Only(s) => s.as_str(),
		}
	}

	fn admits(self, comment: Option<Sentiment>) -> bool {
		match self {
			Self::All => true,
			Self::Only(wanted) => comment == Some(wanted),
		}
	}
}

/// The user's current filter constraints.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilterPredicate {
	/// Which platform an edge must be on.
	pub platform: PlatformChoice,
	/// Which comment sentiment an edge must carry.
	pub sentiment: SentimentChoice,
	/// Matched case-insensitively against node labels. Empty matches everything.
	pub search_text: String,
	/// Nodes with fewer connections are hidden.
	pub min_connections: u32,
}

impl Default for FilterPredicate {
	fn default() -> Self {
		Self::reset()
	}
}

impl FilterPredicate {
	/// The predicate every control returns to on reset.
	pub fn reset() -> Self {
		Self {
			platform: PlatformChoice::All,
			sentiment: SentimentChoice::All,
			search_text: String::new(),
			min_connections: 1,
		}
	}

	/// True when this is exactly the reset predicate.
	pub fn is_reset(&self) -> bool {
		*self == Self::reset()
	}

	/// Build a predicate from raw form values. An unparseable minimum falls back to 1.
	pub fn from_raw(platform: &str, sentiment: &str, search_text: &str, min_connections: &str) -> Self {
		Self {
			platform: PlatformChoice::from_value(platform),
			sentiment: SentimentChoice::from_value(sentiment),
			search_text: search_text.to_string(),
			min_connections: Self::parse_min_connections(min_connections),
		}
	}

	/// Parse the min-connections field; anything unparseable means 1.
	pub fn parse_min_connections(value: &str) -> u32 {
		value.trim().parse().unwrap_or(1)
	}

	fn admits_edge(&self, edge: &DisplayEdge) -> bool {
		self.platform.admits(edge.platform()) && self.sentiment.admits(edge.comment)
	}
}

/// Nodes and edges currently eligible for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subgraph {
	/// Nodes in model order.
	pub nodes: Vec<DisplayNode>,
	/// Edges in model order.
	pub edges: Vec<DisplayEdge>,
}

impl Subgraph {
	/// Ids of nodes an edge references but the subgraph does not contain.
	pub fn dangling_endpoints(&self) -> HashSet<&str> {
		let present: HashSet<&str> = self.nodes.iter().map(DisplayNode::id).collect();
		self.edges
			.iter()
			.flat_map(|e| [e.from(), e.to()])
			.filter(|id| !present.contains(id))
			.collect()
	}
}

/// Apply `predicate` to the full node and edge sequences.
///
/// The reset predicate short-circuits to the complete model, including nodes
/// that no edge touches. Every other predicate goes through the two-phase
/// edge-then-node derivation.
pub fn filter(nodes: &[DisplayNode], edges: &[DisplayEdge], predicate: &FilterPredicate) -> Subgraph {
	if predicate.is_reset() {
		return Subgraph {
			nodes: nodes.to_vec(),
			edges: edges.to_vec(),
		};
	}

	let passing: Vec<DisplayEdge> = edges
		.iter()
		.filter(|e| predicate.admits_edge(e))
		.cloned()
		.collect();

	let touched: HashSet<&str> = passing.iter().flat_map(|e| [e.from(), e.to()]).collect();

	let needle = predicate.search_text.to_lowercase();
	let visible: Vec<DisplayNode> = nodes
		.iter()
		.filter(|n| touched.contains(n.id()))
		.filter(|n| n.connections() >= predicate.min_connections)
		.filter(|n| needle.is_empty() || n.label().to_lowercase().contains(&needle))
		.cloned()
		.collect();

	debug!(
		"sentiment-graph: filter kept {}/{} nodes, {}/{} edges",
		visible.len(),
		nodes.len(),
		passing.len(),
		edges.len()
	);

	Subgraph {
		nodes: visible,
		edges: passing,
	}
}

/// Convenience wrapper over [`filter`] for a whole model.
pub fn filter_model(model: &DisplayModel, predicate: &FilterPredicate) -> Subgraph {
	filter(&model.nodes, &model.edges, predicate)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::{Dataset, DatasetStats, RawEdge, RawNode, SentimentTally};
	use crate::normalize::normalize;

	fn model() -> DisplayModel {
		let node = |id: &str, label: &str, connections| RawNode {
			id: id.into(),
			label: label.into(),
			connections,
			platforms: vec![],
			sentiments: SentimentTally::default(),
		};
		let edge = |from: &str, to: &str, platform: &str, comment: &str| RawEdge {
			from: from.into(),
			to: to.into(),
			description: None,
			platform: platform.into(),
			post_sentiment: "positive".into(),
			comment_sentiment: comment.into(),
			post_link: None,
			comment_index: None,
		};
		normalize(&Dataset {
			nodes: vec![
				node("a", "Alice", 5),
				node("b", "Bob", 3),
				node("c", "Carol", 1),
				node("d", "Dave", 9),
			],
			edges: vec![
				edge("a", "b", "twitter", "Positive"),
				edge("b", "c", "reddit", "negative"),
				edge("c", "a", "twitter", "NEUTRAL"),
				edge("a", "b", "", "unsure"),
			],
			stats: DatasetStats::default(),
		})
		.unwrap()
	}

	fn ids(sub: &Subgraph) -> Vec<&str> {
		sub.nodes.iter().map(DisplayNode::id).collect()
	}

	fn indexes(sub: &Subgraph) -> Vec<usize> {
		sub.edges.iter().map(|e| e.index).collect()
	}

	#[test]
	fn reset_returns_everything_including_untouched_nodes() {
		let m = model();
		let sub = filter_model(&m, &FilterPredicate::reset());
		assert_eq!(ids(&sub), ["a", "b", "c", "d"]);
		assert_eq!(indexes(&sub), [0, 1, 2, 3]);
	}

	#[test]
	fn untouched_nodes_vanish_under_any_active_filter() {
		let m = model();
		let p = FilterPredicate {
			min_connections: 0,
			..FilterPredicate::reset()
		};
		let sub = filter_model(&m, &p);
		assert_eq!(ids(&sub), ["a", "b", "c"]);
	}

	#[test]
	fn platform_filter_is_exact() {
		let m = model();
		let p = FilterPredicate {
			platform: PlatformChoice::Only("twitter".into()),
			..FilterPredicate::reset()
		};
		let sub = filter_model(&m, &p);
		assert_eq!(indexes(&sub), [0, 2]);
		assert_eq!(ids(&sub), ["a", "b", "c"]);

		let p = FilterPredicate {
			platform: PlatformChoice::Only("Twitter".into()),
			..FilterPredicate::reset()
		};
		assert!(filter_model(&m, &p).edges.is_empty());
	}

	#[test]
	fn sentiment_filter_uses_comment_sentiment_only() {
		let m = model();
		let p = FilterPredicate {
			sentiment: SentimentChoice::Only(Sentiment::Neutral),
			..FilterPredicate::reset()
		};
		let sub = filter_model(&m, &p);
		assert_eq!(indexes(&sub), [2]);
		assert_eq!(ids(&sub), ["a", "c"]);
	}

	#[test]
	fn threshold_drops_nodes_but_keeps_their_edges() {
		let m = model();
		let p = FilterPredicate {
			min_connections: 4,
			..FilterPredicate::reset()
		};
		let sub = filter_model(&m, &p);
		assert_eq!(ids(&sub), ["a"]);
		assert_eq!(indexes(&sub), [0, 1, 2, 3]);
		let dangling = sub.dangling_endpoints();
		assert!(dangling.contains("b") && dangling.contains("c"));
	}

	#[test]
	fn search_is_case_insensitive_substring() {
		let m = model();
		let p = FilterPredicate {
			search_text: "AR".into(),
			..FilterPredicate::reset()
		};
		assert_eq!(ids(&filter_model(&m, &p)), ["c"]);
	}

	#[test]
	fn from_raw_parses_form_values() {
		let p = FilterPredicate::from_raw("reddit", "Negative", "bo", "3");
		assert_eq!(p.platform, PlatformChoice::Only("reddit".into()));
		assert_eq!(p.sentiment, SentimentChoice::Only(Sentiment::Negative));
		assert_eq!(p.min_connections, 3);

		let p = FilterPredicate::from_raw("all", "all", "", "abc");
		assert!(p.is_reset());
	}

	#[test]
	fn huge_threshold_yields_no_nodes() {
		let m = model();
		let p = FilterPredicate {
			min_connections: u32::MAX,
			..FilterPredicate::reset()
		};
		let sub = filter_model(&m, &p);
		assert!(sub.nodes.is_empty());
		assert_eq!(sub.edges.len(), 4);
	}
}
