//! Raw dataset model as read from `network_data.json`.
//!
//! Field names mirror the on-disk document exactly. Sentiment labels are kept
//! as the strings found in the file; [`Sentiment::parse`] interprets them.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Categorical tone attached to a post or comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
	/// Favourable tone.
	Positive,
	/// Hostile or critical tone.
	Negative,
	/// Neither.
	Neutral,
}

impl Sentiment {
	/// All sentiments in display order.
	pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

	/// Case-insensitive parse of a raw label. Unrecognised labels yield `None`.
	pub fn parse(label: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|s| label.eq_ignore_ascii_case(s.as_str()))
	}

	/// Lower-case label, as used in the document and in filter values.
	pub fn as_str(self) -> &'static str {
		match self {
			Sentiment::Positive => "positive",
			Sentiment::Negative => "negative",
			Sentiment::Neutral => "neutral",
		}
	}

	/// Capitalised label for panels.
	pub fn title(self) -> &'static str {
		match self {
			Sentiment::Positive => "Positive",
			Sentiment::Negative => "Negative",
			Sentiment::Neutral => "Neutral",
		}
	}
}

/// Per-node sentiment tallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
	/// Positive comments received.
	pub positive: u32,
	/// Negative comments received.
	pub negative: u32,
	/// Neutral comments received.
	pub neutral: u32,
}

impl SentimentTally {
	/// Sum of the three tallies. Computed in `u64` so large tallies cannot overflow.
	pub fn total(&self) -> u64 {
		self.positive as u64 + self.negative as u64 + self.neutral as u64
	}

	/// Tally for one sentiment.
	pub fn get(&self, sentiment: Sentiment) -> u32 {
		match sentiment {
			Sentiment::Positive => self.positive,
			Sentiment::Negative => self.negative,
			Sentiment::Neutral => self.neutral,
		}
	}

	/// Increment the tally for one sentiment.
	pub fn bump(&mut self, sentiment: Sentiment) {
		match sentiment {
			Sentiment::Positive => self.positive += 1,
			Sentiment::Negative => self.negative += 1,
			Sentiment::Neutral => self.neutral += 1,
		}
	}
}

/// An actor in the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
	/// Unique identifier, referenced by edges.
	pub id: String,
	/// Display name.
	pub label: String,
	/// Total degree as computed by the dataset producer.
	pub connections: u32,
	/// Platforms the actor appears on.
	#[serde(default)]
	pub platforms: Vec<String>,
	/// Sentiment of comments received.
	#[serde(default)]
	pub sentiments: SentimentTally,
}

/// A directed interaction between two actors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
	/// Source node id.
	pub from: String,
	/// Target node id.
	pub to: String,
	/// Free-text description shown as the edge tooltip.
	#[serde(default)]
	pub description: Option<String>,
	/// Platform the interaction happened on; empty when unknown.
	#[serde(default)]
	pub platform: String,
	/// Raw label of the post sentiment. Descriptive only.
	#[serde(default)]
	pub post_sentiment: String,
	/// Raw label of the comment sentiment. Drives edge color and filtering.
	#[serde(default)]
	pub comment_sentiment: String,
	/// Link to the original post.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub post_link: Option<String>,
	/// Position of the comment under its post.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub comment_index: Option<i64>,
}

/// Aggregate metadata shipped with the dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
	/// Every platform present, used to populate the platform filter.
	pub platforms: Vec<String>,
	/// Node count reported by the producer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_nodes: Option<usize>,
	/// Edge count reported by the producer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_edges: Option<usize>,
	/// Comment sentiment totals over all edges.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sentiment_distribution: Option<SentimentTally>,
}

/// Complete input document: nodes, edges and aggregate stats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
	/// Actors, in file order.
	pub nodes: Vec<RawNode>,
	/// Interactions, in file order.
	pub edges: Vec<RawEdge>,
	/// Producer-side aggregates.
	pub stats: DatasetStats,
}

impl Dataset {
	/// Parse a dataset document from JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Parse a dataset document from raw bytes.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(bytes)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	const SAMPLE: &str = r#"{
		"nodes": [
			{"id": "a", "label": "Alice", "connections": 2, "platforms": ["Twitter"],
			 "sentiments": {"positive": 1, "negative": 0, "neutral": 0}},
			{"id": "b", "label": "Bob", "connections": 1, "platforms": [],
			 "sentiments": {"positive": 0, "negative": 0, "neutral": 0}}
		],
		"edges": [
			{"from": "a", "to": "b", "description": "reply", "platform": "Twitter",
			 "post_sentiment": "Neutral", "comment_sentiment": "POSITIVE",
			 "post_link": "https://example.com/p/1", "comment_index": 4}
		],
		"stats": {"platforms": ["Twitter"], "total_nodes": 2, "total_edges": 1}
	}"#;

	#[test]
	fn parses_document_with_optional_fields() {
		let ds = Dataset::from_json(SAMPLE).unwrap();
		assert_eq!(ds.nodes.len(), 2);
		assert_eq!(ds.edges[0].comment_index, Some(4));
		assert_eq!(ds.edges[0].description.as_deref(), Some("reply"));
		assert_eq!(ds.stats.platforms, vec!["Twitter".to_string()]);
		assert_eq!(ds.stats.sentiment_distribution, None);
	}

	#[test]
	fn missing_stats_is_a_load_error() {
		let err = Dataset::from_json(r#"{"nodes": [], "edges": []}"#).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::DataLoad);
	}

	#[test]
	fn sentiment_parse_ignores_case_only() {
		assert_eq!(Sentiment::parse("Positive"), Some(Sentiment::Positive));
		assert_eq!(Sentiment::parse("NEGATIVE"), Some(Sentiment::Negative));
		assert_eq!(Sentiment::parse("neutral"), Some(Sentiment::Neutral));
		assert_eq!(Sentiment::parse(" positive"), None);
		assert_eq!(Sentiment::parse("mixed"), None);
		assert_eq!(Sentiment::parse(""), None);
	}
}
