//! The loaded-state screen: filters, canvas, statistics and node details.

use std::sync::Arc;

use leptos::prelude::*;

use super::filter_panel::FilterPanel;
use super::force_graph::{ForceGraphCanvas, ViewCommand};
use super::stats_panel::{NodeInfoPanel, StatsPanel};
use crate::config::ViewerConfig;
use crate::encoding::{ColorCategory, node_colors};
use crate::filter::FilterPredicate;
use crate::session::GraphSession;
use crate::stats::aggregate_subgraph;

/// Interactive explorer over a loaded session.
///
/// The predicate is the single piece of filter state; the subgraph, the
/// statistics and the node details are all derived from it and the selection.
#[component]
pub fn Explorer(
	/// The loaded dataset and its commands.
	session: Arc<GraphSession>,
	/// Viewer settings; only the simulation part is used here.
	config: ViewerConfig,
) -> impl IntoView {
	let predicate = RwSignal::new(FilterPredicate::reset());
	let selected = RwSignal::new(None::<String>);
	let commands = RwSignal::new(None::<ViewCommand>);
	let physics = RwSignal::new(true);

	let session_sub = session.clone();
	let subgraph = Memo::new(move |_| predicate.with(|p| session_sub.on_predicate_changed(p)));
	let stats = Memo::new(move |_| subgraph.with(aggregate_subgraph));

	let session_info = session.clone();
	let node_info = Signal::derive(move || {
		selected.with(|id| id.as_deref().and_then(|id| session_info.on_node_selected(id)))
	});

	let on_reset = Callback::new(move |()| {
		predicate.set(FilterPredicate::reset());
		selected.set(None);
	});
	let on_select = Callback::new(move |id: Option<String>| selected.set(id));

	let toggle_physics = move |_| {
		let enabled = !physics.get_untracked();
		physics.set(enabled);
		commands.set(Some(ViewCommand::SetPhysics(enabled)));
	};

	let legend = ColorCategory::ALL
		.into_iter()
		.map(|category| {
			let swatch = node_colors(category).background.to_css();
			view! {
				<div class="legend-item">
					<span class="legend-swatch" style:background-color=swatch></span>
					<span class="legend-label">{category.legend()}</span>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="explorer">
			<aside class="sidebar">
				<FilterPanel
					predicate=predicate
					platforms=session.platforms().to_vec()
					slider_max=session.connections_slider_max()
					on_reset=on_reset
				/>
				<StatsPanel stats=stats />
				<section class="panel legend">
					<h2>"Legend"</h2>
					{legend}
				</section>
				<NodeInfoPanel info=node_info />
			</aside>

			<main class="graph-area">
				<ForceGraphCanvas
					data=subgraph
					selected=selected
					commands=commands
					on_select=on_select
					simulation=config.simulation
				/>
				<div class="graph-controls">
					<button id="zoom-in" on:click=move |_| commands.set(Some(ViewCommand::ZoomIn))>
						"+"
					</button>
					<button id="zoom-out" on:click=move |_| commands.set(Some(ViewCommand::ZoomOut))>
						"-"
					</button>
					<button id="fit-network" on:click=move |_| commands.set(Some(ViewCommand::Fit))>
						"Fit"
					</button>
					<button id="toggle-physics" on:click=toggle_physics>
						{move || if physics.get() { "Freeze" } else { "Unfreeze" }}
					</button>
				</div>
			</main>
		</div>
	}
}
