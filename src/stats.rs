//! Summary statistics for the statistics panel.

use crate::dataset::{Sentiment, SentimentTally};
use crate::filter::Subgraph;
use crate::normalize::DisplayEdge;

/// Share of each recognised sentiment, in percent. All zero when nothing is counted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SentimentPercentages {
	/// Percent of counted edges with positive comments.
	pub positive: f64,
	/// Percent of counted edges with negative comments.
	pub negative: f64,
	/// Percent of counted edges with neutral comments.
	pub neutral: f64,
}

impl SentimentPercentages {
	/// Percentage for one sentiment.
	pub fn get(&self, sentiment: Sentiment) -> f64 {
		match sentiment {
			Sentiment::Positive => self.positive,
			Sentiment::Negative => self.negative,
			Sentiment::Neutral => self.neutral,
		}
	}
}

/// Breakdown of an edge set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
	/// Edges per recognised comment sentiment.
	pub sentiment_counts: SentimentTally,
	/// Shares of `sentiment_counts`, all zero when nothing is counted.
	pub percentages: SentimentPercentages,
	/// `(platform, edges)` by count descending, ties in first-seen order.
	pub platform_counts: Vec<(String, usize)>,
	/// Nodes in the subgraph the edges came from (0 for a bare edge set).
	pub node_count: usize,
	/// Size of the input edge set, recognised sentiment or not.
	pub edge_count: usize,
}

impl Stats {
	/// Number of edges with a recognised comment sentiment.
	pub fn counted_sentiments(&self) -> u64 {
		self.sentiment_counts.total()
	}
}

/// Aggregate sentiment and platform breakdowns over an edge set.
pub fn aggregate(edges: &[DisplayEdge]) -> Stats {
	let mut sentiment_counts = SentimentTally::default();
	for sentiment in edges.iter().filter_map(|e| e.comment) {
		sentiment_counts.bump(sentiment);
	}

	let total = sentiment_counts.total();
	let percentages = if total == 0 {
		SentimentPercentages::default()
	} else {
		let pct = |count: u32| count as f64 / total as f64 * 100.0;
		SentimentPercentages {
			positive: pct(sentiment_counts.positive),
			negative: pct(sentiment_counts.negative),
			neutral: pct(sentiment_counts.neutral),
		}
	};

	let mut platform_counts: Vec<(String, usize)> = Vec::new();
	for platform in edges.iter().map(DisplayEdge::platform).filter(|p| !p.is_empty()) {
		match platform_counts.iter_mut().find(|(name, _)| name == platform) {
			Some((_, count)) => *count += 1,
			None => platform_counts.push((platform.to_string(), 1)),
		}
	}
	// sort_by is stable, so equal counts keep first-seen order
	platform_counts.sort_by(|a, b| b.1.cmp(&a.1));

	Stats {
		sentiment_counts,
		percentages,
		platform_counts,
		node_count: 0,
		edge_count: edges.len(),
	}
}

/// [`aggregate`] over a subgraph's edges, also reporting its node count.
pub fn aggregate_subgraph(subgraph: &Subgraph) -> Stats {
	Stats {
		node_count: subgraph.nodes.len(),
		..aggregate(&subgraph.edges)
	}
}
