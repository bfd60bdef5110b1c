#![allow(unused_crate_dependencies)]

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::Config;
use sentiment_graph::dataset::{Dataset, DatasetStats, RawEdge, RawNode, Sentiment, SentimentTally};
use sentiment_graph::encoding::{ColorCategory, node_color_category};
use sentiment_graph::filter::{FilterPredicate, PlatformChoice, SentimentChoice, filter_model};
use sentiment_graph::normalize::{DisplayModel, normalize};
use sentiment_graph::stats::aggregate_subgraph;

const PLATFORMS: [&str; 3] = ["twitter", "reddit", "facebook"];
const COMMENT_LABELS: [&str; 6] = ["positive", "Negative", "NEUTRAL", "neutral", "unsure", ""];

type NodeSpec = (String, u32, (u32, u32, u32));
type EdgeSpec = (usize, usize, &'static str, &'static str);

fn build(nodes: Vec<NodeSpec>, edges: Vec<EdgeSpec>) -> DisplayModel {
	let dataset = Dataset {
		nodes: nodes
			.into_iter()
			.enumerate()
			.map(|(i, (label, connections, (positive, negative, neutral)))| RawNode {
				id: format!("n{i}"),
				label,
				connections,
				platforms: vec![],
				sentiments: SentimentTally {
					positive,
					negative,
					neutral,
				},
			})
			.collect(),
		edges: edges
			.into_iter()
			.map(|(from, to, platform, comment)| RawEdge {
				from: format!("n{from}"),
				to: format!("n{to}"),
				description: None,
				platform: platform.to_string(),
				post_sentiment: "neutral".to_string(),
				comment_sentiment: comment.to_string(),
				post_link: None,
				comment_index: None,
			})
			.collect(),
		stats: DatasetStats {
			platforms: PLATFORMS.iter().map(|p| p.to_string()).collect(),
			..Default::default()
		},
	};
	normalize(&dataset).expect("generated dataset is consistent")
}

fn model() -> impl Strategy<Value = DisplayModel> {
	prop::collection::vec(("[a-cA-C]{1,6}", 0u32..20, (0u32..10, 0u32..10, 0u32..10)), 1..12)
		.prop_flat_map(|nodes| {
			let n = nodes.len();
			let edges = prop::collection::vec(
				(
					0..n,
					0..n,
					prop::sample::select(PLATFORMS.to_vec()),
					prop::sample::select(COMMENT_LABELS.to_vec()),
				),
				0..24,
			);
			(Just(nodes), edges)
		})
		.prop_map(|(nodes, edges)| build(nodes, edges))
}

fn predicate() -> impl Strategy<Value = FilterPredicate> {
	(
		prop_oneof![
			Just(PlatformChoice::All),
			prop::sample::select(PLATFORMS.to_vec()).prop_map(|p| PlatformChoice::Only(p.to_string())),
		],
		prop_oneof![
			Just(SentimentChoice::All),
			prop::sample::select(Sentiment::ALL.to_vec()).prop_map(SentimentChoice::Only),
		],
		prop_oneof![Just(String::new()), "[a-c]{1,2}"],
		0u32..15,
	)
		.prop_map(|(platform, sentiment, search_text, min_connections)| FilterPredicate {
			platform,
			sentiment,
			search_text,
			min_connections,
		})
}

proptest! {
	#![proptest_config(Config::with_cases(256))]

	#[test]
	fn reset_reproduces_the_full_model(m in model()) {
		let sub = filter_model(&m, &FilterPredicate::reset());
		prop_assert_eq!(&sub.nodes, &m.nodes);
		prop_assert_eq!(&sub.edges, &m.edges);
	}

	#[test]
	fn visible_nodes_are_reachable(m in model(), p in predicate()) {
		let touched: HashSet<&str> = m.edges.iter().flat_map(|e| [e.from(), e.to()]).collect();
		let no_isolated = m.nodes.iter().all(|n| touched.contains(n.id()));
		prop_assume!(!p.is_reset() || no_isolated);

		let sub = filter_model(&m, &p);
		let endpoints: HashSet<&str> = sub.edges.iter().flat_map(|e| [e.from(), e.to()]).collect();
		for node in &sub.nodes {
			prop_assert!(endpoints.contains(node.id()), "{} has no visible edge", node.id());
		}
	}

	#[test]
	fn filtering_is_deterministic(m in model(), p in predicate()) {
		prop_assert_eq!(filter_model(&m, &p), filter_model(&m, &p));
	}

	#[test]
	fn filtered_edges_satisfy_the_predicate(m in model(), p in predicate()) {
		let sub = filter_model(&m, &p);
		for edge in &sub.edges {
			if let PlatformChoice::Only(platform) = &p.platform {
				prop_assert_eq!(edge.platform(), platform.as_str());
			}
			if let SentimentChoice::Only(sentiment) = p.sentiment {
				prop_assert_eq!(edge.comment, Some(sentiment));
			}
		}
		if !p.is_reset() {
			let needle = p.search_text.to_lowercase();
			for node in &sub.nodes {
				prop_assert!(node.connections() >= p.min_connections);
				prop_assert!(node.label().to_lowercase().contains(&needle));
			}
		}
	}

	#[test]
	fn sentiment_counts_never_exceed_edges(m in model(), p in predicate()) {
		let sub = filter_model(&m, &p);
		let stats = aggregate_subgraph(&sub);
		let recognised = sub.edges.iter().filter(|e| e.comment.is_some()).count() as u64;

		prop_assert_eq!(stats.edge_count, sub.edges.len());
		prop_assert_eq!(stats.node_count, sub.nodes.len());
		prop_assert!(stats.counted_sentiments() <= sub.edges.len() as u64);
		prop_assert_eq!(stats.counted_sentiments(), recognised);
		if recognised > 0 {
			let sum: f64 = Sentiment::ALL.iter().map(|s| stats.percentages.get(*s)).sum();
			prop_assert!((sum - 100.0).abs() < 1e-9);
		}
	}

	#[test]
	fn category_follows_strict_majority(positive in 0u32..1000, negative in 0u32..1000, neutral in 0u32..1000) {
		let tally = SentimentTally { positive, negative, neutral };
		let total = tally.total() as f64;
		let expected = if tally.total() == 0 {
			ColorCategory::Isolated
		} else if positive as f64 / total > 0.5 {
			ColorCategory::DominantPositive
		} else if negative as f64 / total > 0.5 {
			ColorCategory::DominantNegative
		} else {
			ColorCategory::Mixed
		};
		prop_assert_eq!(node_color_category(&tally), expected);
	}
}
