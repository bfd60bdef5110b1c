//! Dataset loading: inline `<script id="graph-data">` or an HTTP fetch.

use gloo_net::http::Request;
use log::{error, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::config::ViewerConfig;
use crate::dataset::Dataset;
use crate::error::{GraphError, Result};
use crate::session::GraphSession;

/// Element id of an optional inline dataset.
pub const DATA_ELEMENT_ID: &str = "graph-data";

/// Read the dataset embedded in the page, if any.
/// Expected format: JSON with { nodes: [...], edges: [...], stats: { platforms: [...] } }
fn inline_dataset_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(DATA_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Fetch the dataset document from `url`.
pub async fn fetch_dataset(url: &str) -> Result<Dataset> {
	let load_error = |message: String| GraphError::DataLoad {
		origin: url.to_string(),
		message,
	};

	let response = Request::get(url)
		.send()
		.await
		.map_err(|e| load_error(e.to_string()))?;
	if !response.ok() {
		return Err(load_error(format!(
			"HTTP {} {}",
			response.status(),
			response.status_text()
		)));
	}
	let bytes = response
		.binary()
		.await
		.map_err(|e| load_error(e.to_string()))?;
	Dataset::from_slice(&bytes)
}

/// Load the dataset (inline first, then `config.data_url`) and build a session.
pub async fn load_session(config: &ViewerConfig) -> Result<GraphSession> {
	let dataset = match inline_dataset_text() {
		Some(text) => {
			info!("sentiment-graph: reading inline dataset #{}", DATA_ELEMENT_ID);
			Dataset::from_json(&text)?
		}
		None => {
			info!("sentiment-graph: fetching {}", config.data_url);
			fetch_dataset(&config.data_url).await?
		}
	};
	info!(
		"sentiment-graph: loaded {} nodes, {} edges",
		dataset.nodes.len(),
		dataset.edges.len()
	);

	GraphSession::new(&dataset, &config.encoding, config.slider_cap).inspect_err(|e| {
		error!("sentiment-graph: rejected dataset: {}", e);
	})
}
