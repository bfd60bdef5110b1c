//! Statistics and node inspection panels.

use leptos::prelude::*;

use crate::dataset::Sentiment;
use crate::encoding::sentiment_color;
use crate::session::NodeInfo;
use crate::stats::Stats;

/// Node/edge counts, sentiment bars and per-platform edge counts.
#[component]
pub fn StatsPanel(
	/// Statistics of the visible subgraph.
	#[prop(into)]
	stats: Signal<Stats>,
) -> impl IntoView {
	let bars = Sentiment::ALL
		.into_iter()
		.map(|sentiment| {
			let color = sentiment_color(sentiment.as_str()).to_css();
			let width = move || {
				stats.with(|s| {
					if s.counted_sentiments() == 0 {
						"0%".to_string()
					} else {
						format!("{:.1}%", s.percentages.get(sentiment))
					}
				})
			};
			view! {
				<div class="sentiment-row">
					<span class=format!("sentiment-label {}", sentiment.as_str())>
						{sentiment.title()}
					</span>
					<div class="sentiment-track">
						<div
							class="sentiment-bar"
							style:width=width
							style:background-color=color
						></div>
					</div>
					<span class="sentiment-value">
						{move || stats.with(|s| s.sentiment_counts.get(sentiment))}
					</span>
				</div>
			}
		})
		.collect_view();

	view! {
		<section class="panel stats">
			<div class="header-stats">
				<div class="stat">
					<span id="total-nodes">{move || stats.with(|s| s.node_count)}</span>
					<span class="stat-label">"Nodes"</span>
				</div>
				<div class="stat">
					<span id="total-edges">{move || stats.with(|s| s.edge_count)}</span>
					<span class="stat-label">"Edges"</span>
				</div>
			</div>

			<h2>"Sentiment distribution"</h2>
			{bars}

			<h2>"Platforms"</h2>
			<div id="platform-list">
				{move || {
					stats
						.with(|s| s.platform_counts.clone())
						.into_iter()
						.map(|(platform, count)| {
							view! {
								<div class="platform-item">
									<span class="platform-name">{platform}</span>
									<span class="platform-count">{count}</span>
								</div>
							}
						})
						.collect_view()
				}}
			</div>
		</section>
	}
}

/// Details of the selected node. Renders nothing when no node is selected.
#[component]
pub fn NodeInfoPanel(
	/// Record of the selected node, if any.
	#[prop(into)]
	info: Signal<Option<NodeInfo>>,
) -> impl IntoView {
	move || {
		info.get().map(|node| {
			view! {
				<section id="node-info-section" class="panel node-info">
					<h2>"Node details"</h2>
					<div class="node-info-item">
						<div class="node-info-label">"Name"</div>
						<div class="node-info-value">{node.label}</div>
					</div>
					<div class="node-info-item">
						<div class="node-info-label">"Total Connections"</div>
						<div class="node-info-value">{node.connections}</div>
					</div>
					<div class="node-info-item">
						<div class="node-info-label">"Platforms"</div>
						<div class="node-info-value">{node.platforms}</div>
					</div>
					<div class="node-info-item">
						<div class="node-info-label">"Sentiment Distribution"</div>
						<div class="node-info-value">
							<span class="positive">"Positive: " {node.positive}</span>
							<br />
							<span class="negative">"Negative: " {node.negative}</span>
							<br />
							<span class="neutral">"Neutral: " {node.neutral}</span>
						</div>
					</div>
				</section>
			}
		})
	}
}
