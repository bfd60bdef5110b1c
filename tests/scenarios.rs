#![allow(unused_crate_dependencies)]

use sentiment_graph::config::EncodingConfig;
use sentiment_graph::dataset::{Dataset, Sentiment};
use sentiment_graph::encoding::ColorCategory;
use sentiment_graph::error::ErrorKind;
use sentiment_graph::filter::{FilterPredicate, SentimentChoice};
use sentiment_graph::normalize::DisplayNode;
use sentiment_graph::session::GraphSession;
use sentiment_graph::stats::aggregate;

const TWO_NODES: &str = r#"{
	"nodes": [
		{
			"id": "A",
			"label": "Alice",
			"connections": 10,
			"platforms": ["twitter"],
			"sentiments": { "positive": 8, "negative": 1, "neutral": 1 }
		},
		{
			"id": "B",
			"label": "Bob",
			"connections": 2,
			"platforms": [],
			"sentiments": { "positive": 0, "negative": 0, "neutral": 0 }
		}
	],
	"edges": [
		{
			"from": "A",
			"to": "B",
			"description": "reply",
			"platform": "twitter",
			"post_sentiment": "neutral",
			"comment_sentiment": "Positive"
		}
	],
	"stats": { "platforms": ["twitter"] }
}"#;

fn session() -> GraphSession {
	let dataset = Dataset::from_json(TWO_NODES).expect("valid document");
	GraphSession::new(&dataset, &EncodingConfig::default(), 100).expect("consistent dataset")
}

fn ids(nodes: &[DisplayNode]) -> Vec<&str> {
	nodes.iter().map(DisplayNode::id).collect()
}

#[test]
fn reset_shows_both_nodes_and_the_edge() {
	let s = session();
	let sub = s.on_reset();
	assert_eq!(ids(&sub.nodes), ["A", "B"]);
	assert_eq!(sub.edges.len(), 1);
	assert_eq!(sub.edges[0].index, 0);
	assert_eq!(sub.edges[0].comment, Some(Sentiment::Positive));

	assert_eq!(sub.nodes[0].color_category, ColorCategory::DominantPositive);
	assert_eq!(sub.nodes[1].color_category, ColorCategory::Isolated);
	assert_eq!(sub.nodes[0].size_value, 10);
}

#[test]
fn threshold_hides_the_target_but_keeps_its_edge() {
	let s = session();
	let p = FilterPredicate {
		min_connections: 5,
		..FilterPredicate::reset()
	};
	let sub = s.on_predicate_changed(&p);
	assert_eq!(ids(&sub.nodes), ["A"]);
	assert_eq!(sub.edges.len(), 1);
	assert!(sub.dangling_endpoints().contains("B"));
}

#[test]
fn unmatched_sentiment_gives_empty_subgraph_and_zero_stats() {
	let s = session();
	let p = FilterPredicate {
		sentiment: SentimentChoice::Only(Sentiment::Negative),
		..FilterPredicate::reset()
	};
	let sub = s.on_predicate_changed(&p);
	assert!(sub.nodes.is_empty());
	assert!(sub.edges.is_empty());

	let stats = aggregate(&sub.edges);
	assert_eq!(stats.counted_sentiments(), 0);
	assert_eq!(stats.edge_count, 0);
	for sentiment in Sentiment::ALL {
		assert_eq!(stats.percentages.get(sentiment), 0.0);
	}
	assert!(stats.platform_counts.is_empty());
}

#[test]
fn raw_form_values_drive_the_session() {
	let s = session();
	let sub = s.on_predicate_changed(&FilterPredicate::from_raw("twitter", "positive", "ali", "x"));
	assert_eq!(ids(&sub.nodes), ["A"]);
	assert_eq!(s.connections_slider_max(), 10);
	assert_eq!(s.platforms(), ["twitter"]);
}

#[test]
fn selecting_a_node_reports_its_record() {
	let info = session().on_node_selected("B").expect("B exists");
	assert_eq!(info.label, "Bob");
	assert_eq!(info.connections, 2);
	assert_eq!(info.platforms, "N/A");
}

#[test]
fn edge_to_unknown_node_is_rejected() {
	let text = TWO_NODES.replace(r#""to": "B""#, r#""to": "Z""#);
	let dataset = Dataset::from_json(&text).expect("valid document");
	let err = GraphSession::new(&dataset, &EncodingConfig::default(), 100).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}

#[test]
fn malformed_document_is_a_load_error() {
	let err = Dataset::from_json("{ \"nodes\": [").unwrap_err();
	assert_eq!(err.kind(), ErrorKind::DataLoad);
}
