//! sentiment-graph: interactive explorer for social-media sentiment networks.
//!
//! Loads a dataset of people (nodes) and the posts/comments connecting them
//! (edges), encodes sentiment as color and connection count as size, and lets
//! the user filter, inspect and summarize the network in a force-directed view.
//!
//! The core (`dataset`, `normalize`, `filter`, `stats`, `session`) is plain
//! Rust and runs anywhere; `loader`, `config` and `components` need a browser.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, error, info};

pub mod components;
pub mod config;
pub mod convert;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod session;
pub mod stats;

pub use components::{Explorer, ForceGraphCanvas};
pub use error::{GraphError, Result};
pub use session::GraphSession;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("sentiment-graph: logging initialized");
}

/// Application lifecycle: one load attempt, then either explorer or error.
#[derive(Clone)]
enum LoadState {
	Loading,
	Ready(Arc<GraphSession>),
	Failed(String),
}

/// Main application component.
/// Loads the dataset, then renders the explorer or a terminal error screen.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = config::load_viewer_config();
	let state = RwSignal::new(LoadState::Loading);

	let load_config = config.clone();
	spawn_local(async move {
		match loader::load_session(&load_config).await {
			Ok(session) => state.set(LoadState::Ready(Arc::new(session))),
			Err(e) => {
				error!("sentiment-graph: load failed ({:?}): {}", e.kind(), e);
				state.set(LoadState::Failed(e.user_message()));
			}
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Sentiment Network Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{move || match state.get() {
			LoadState::Loading => view! {
				<div id="loading" class="loading">
					<div class="spinner"></div>
					<p>"Loading network..."</p>
				</div>
			}
			.into_any(),
			LoadState::Ready(session) => view! {
				<Explorer session=session config=config.clone() />
			}
			.into_any(),
			LoadState::Failed(message) => view! {
				<div id="loading" class="loading error">
					<p>{message}</p>
				</div>
			}
			.into_any(),
		}}
	}
}
