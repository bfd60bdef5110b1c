//! Build a [`Dataset`] from flat connection records.
//!
//! This is the aggregation step that produces `network_data.json` from a
//! spreadsheet-style export with one row per interaction.

use std::collections::HashMap;

use serde::Deserialize;

use crate::dataset::{Dataset, DatasetStats, RawEdge, RawNode, Sentiment, SentimentTally};

/// One exported interaction row. Missing cells are `None`.
///
/// Both snake_case keys and the spreadsheet's column headers are accepted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ConnectionRecord {
	/// Source actor.
	#[serde(alias = "From")]
	pub from: String,
	/// Target actor.
	#[serde(alias = "To")]
	pub to: String,
	/// Free-text description of the interaction.
	#[serde(default, alias = "Description")]
	pub description: Option<String>,
	/// Link to the original post.
	#[serde(default)]
	pub post_link: Option<String>,
	/// Platform the interaction happened on.
	#[serde(default, alias = "Platform")]
	pub platform: Option<String>,
	/// Sentiment label of the post.
	#[serde(default, alias = "Post_Sentiment")]
	pub post_sentiment: Option<String>,
	/// Tallied onto the target; missing means neutral.
	#[serde(default, alias = "Comment_Sentiment")]
	pub comment_sentiment: Option<String>,
	/// Position of the comment under its post; missing means 0.
	#[serde(default, alias = "Comment_Index")]
	pub comment_index: Option<i64>,
}

impl Dataset {
	/// Aggregate connection records into nodes, edges and stats.
	///
	/// Nodes appear in first-seen order. Each row adds one connection to both
	/// endpoints (twice for a self-loop), its platform to both endpoints, and
	/// its comment sentiment to the target's tallies. A missing comment
	/// sentiment is tallied as neutral but stored as an empty label.
	pub fn from_connections<'a, I>(records: I) -> Self
	where
		I: IntoIterator<Item = &'a ConnectionRecord>,
	{
		let mut nodes: Vec<RawNode> = Vec::new();
		let mut index: HashMap<String, usize> = HashMap::new();
		let mut edges = Vec::new();
		let mut platforms: Vec<String> = Vec::new();

		let mut slot = |nodes: &mut Vec<RawNode>, id: &str| -> usize {
			*index.entry(id.to_string()).or_insert_with(|| {
				nodes.push(RawNode {
					id: id.to_string(),
					label: id.to_string(),
					connections: 0,
					platforms: Vec::new(),
					sentiments: SentimentTally::default(),
				});
				nodes.len() - 1
			})
		};

		for record in records {
			let from = slot(&mut nodes, &record.from);
			let to = slot(&mut nodes, &record.to);
			nodes[from].connections += 1;
			nodes[to].connections += 1;

			let platform = record.platform.clone().unwrap_or_default();
			if !platform.is_empty() {
				for i in [from, to] {
					if !nodes[i].platforms.contains(&platform) {
						nodes[i].platforms.push(platform.clone());
					}
				}
				if !platforms.contains(&platform) {
					platforms.push(platform.clone());
				}
			}

			let tallied = record.comment_sentiment.as_deref().unwrap_or("neutral");
			if let Some(sentiment) = Sentiment::parse(tallied) {
				nodes[to].sentiments.bump(sentiment);
			}

			edges.push(RawEdge {
				from: record.from.clone(),
				to: record.to.clone(),
				description: Some(record.description.clone().unwrap_or_default()),
				platform,
				post_sentiment: record.post_sentiment.clone().unwrap_or_default(),
				comment_sentiment: record.comment_sentiment.clone().unwrap_or_default(),
				post_link: Some(record.post_link.clone().unwrap_or_default()),
				comment_index: Some(record.comment_index.unwrap_or(0)),
			});
		}

		let mut distribution = SentimentTally::default();
		for sentiment in edges.iter().filter_map(|e| Sentiment::parse(&e.comment_sentiment)) {
			distribution.bump(sentiment);
		}

		let stats = DatasetStats {
			platforms,
			total_nodes: Some(nodes.len()),
			total_edges: Some(edges.len()),
			sentiment_distribution: Some(distribution),
		};
		Dataset {
			nodes,
			edges,
			stats,
		}
	}

	/// Human-readable totals printed after a conversion.
	pub fn conversion_summary(&self) -> String {
		let dist = self.stats.sentiment_distribution.unwrap_or_default();
		format!(
			"Total Nodes: {}\nTotal Edges: {}\nPlatforms: {}\nSentiment Distribution: Positive={}, Negative={}, Neutral={}",
			self.nodes.len(),
			self.edges.len(),
			self.stats.platforms.join(", "),
			dist.positive,
			dist.negative,
			dist.neutral
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(from: &str, to: &str, platform: Option<&str>, comment: Option<&str>) -> ConnectionRecord {
		ConnectionRecord {
			from: from.into(),
			to: to.into(),
			platform: platform.map(Into::into),
			comment_sentiment: comment.map(Into::into),
			..Default::default()
		}
	}

	#[test]
	fn aggregates_nodes_in_first_seen_order() {
		let rows = vec![
			row("alice", "bob", Some("Twitter"), Some("Positive")),
			row("carol", "bob", Some("Reddit"), Some("negative")),
			row("bob", "alice", Some("Twitter"), None),
		];
		let ds = Dataset::from_connections(&rows);

		let ids: Vec<_> = ds.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["alice", "bob", "carol"]);
		assert_eq!(ds.nodes[0].connections, 2);
		assert_eq!(ds.nodes[1].connections, 3);
		assert_eq!(ds.nodes[1].platforms, vec!["Twitter".to_string(), "Reddit".to_string()]);
		assert_eq!(
			ds.nodes[1].sentiments,
			SentimentTally {
				positive: 1,
				negative: 1,
				neutral: 0
			}
		);
		// missing comment sentiment counts as neutral for the target
		assert_eq!(ds.nodes[0].sentiments.neutral, 1);
		assert_eq!(ds.edges[2].comment_sentiment, "");

		assert_eq!(ds.stats.platforms, vec!["Twitter".to_string(), "Reddit".to_string()]);
		assert_eq!(ds.stats.total_nodes, Some(3));
		let dist = ds.stats.sentiment_distribution.unwrap();
		assert_eq!((dist.positive, dist.negative, dist.neutral), (1, 1, 0));
	}

	#[test]
	fn self_loop_counts_twice_and_missing_platform_is_empty() {
		let ds = Dataset::from_connections(&[row("x", "x", None, Some("sarcastic"))]);
		assert_eq!(ds.nodes.len(), 1);
		assert_eq!(ds.nodes[0].connections, 2);
		assert!(ds.nodes[0].platforms.is_empty());
		assert_eq!(ds.nodes[0].sentiments.total(), 0);
		assert_eq!(ds.edges[0].platform, "");
		assert_eq!(ds.edges[0].comment_index, Some(0));
		assert!(ds.stats.platforms.is_empty());
	}

	#[test]
	fn built_dataset_normalizes() {
		let rows = [row("a", "b", Some("Twitter"), Some("positive"))];
		let ds = Dataset::from_connections(&rows);
		assert!(crate::normalize::normalize(&ds).is_ok());
	}

	#[test]
	fn reads_spreadsheet_headers() {
		let rows: Vec<ConnectionRecord> = serde_json::from_str(
			r#"[{"From": "a", "To": "b", "Platform": "Reddit", "Comment_Sentiment": "Negative", "Comment_Index": 4}]"#,
		)
		.unwrap();
		assert_eq!(rows[0].platform.as_deref(), Some("Reddit"));
		assert_eq!(rows[0].comment_index, Some(4));

		let ds = Dataset::from_connections(&rows);
		assert_eq!(
			ds.conversion_summary(),
			"Total Nodes: 2\nTotal Edges: 1\nPlatforms: Reddit\nSentiment Distribution: Positive=0, Negative=1, Neutral=0"
		);
	}

	#[test]
	fn written_document_loads_back() {
		let ds = Dataset::from_connections(&[row("a", "b", Some("Twitter"), Some("positive"))]);
		let text = serde_json::to_string_pretty(&ds).unwrap();
		assert_eq!(Dataset::from_json(&text).unwrap(), ds);
	}
}
