//! Viewer configuration.
//!
//! Defaults cover everything; a page may override any subset by embedding
//! `<script id="viewer-config" type="application/json">{...}</script>`.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

use crate::encoding::EdgeOpacity;
use crate::error::{GraphError, Result};

/// Element id of the optional inline config override.
pub const CONFIG_ELEMENT_ID: &str = "viewer-config";

/// Parameters of the visual encoding applied by the normalizer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
	/// Upper bound on a node's size value.
	pub node_size_cap: u32,
	/// Edge opacities for rest/hover/highlight.
	pub edge_opacity: EdgeOpacity,
}

impl Default for EncodingConfig {
	fn default() -> Self {
		Self {
			node_size_cap: 50,
			edge_opacity: EdgeOpacity::default(),
		}
	}
}

/// Force simulation tuning, forwarded to `force_graph`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Repulsion between nodes.
	pub force_charge: f32,
	/// Spring strength along edges.
	pub force_spring: f32,
	/// Cap on the force applied per step.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity kept per step, below 1.
	pub damping_factor: f32,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// Top-level viewer configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
	/// Where to fetch the dataset from when it is not embedded in the page.
	pub data_url: String,
	/// Visual encoding applied when normalizing.
	pub encoding: EncodingConfig,
	/// Hard ceiling for the min-connections slider.
	pub slider_cap: u32,
	/// Layout physics.
	pub simulation: SimulationConfig,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			data_url: "network_data.json".to_string(),
			encoding: EncodingConfig::default(),
			slider_cap: 100,
			simulation: SimulationConfig::default(),
		}
	}
}

impl ViewerConfig {
	/// Parse and validate a JSON override document.
	pub fn from_json(text: &str) -> Result<Self> {
		let config: Self =
			serde_json::from_str(text).map_err(|e| GraphError::Config(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Reject settings that would break encoding invariants.
	pub fn validate(&self) -> Result<()> {
		if !self.encoding.edge_opacity.is_valid() {
			return Err(GraphError::Config(
				"edge opacities must lie in [0, 1] with rest < hover < highlight".into(),
			));
		}
		if self.encoding.node_size_cap == 0 {
			return Err(GraphError::Config("node_size_cap must be positive".into()));
		}
		if self.slider_cap == 0 {
			return Err(GraphError::Config("slider_cap must be positive".into()));
		}
		if self.data_url.trim().is_empty() {
			return Err(GraphError::Config("data_url must not be empty".into()));
		}
		Ok(())
	}
}

/// Load the config override from the page, falling back to defaults.
pub fn load_viewer_config() -> ViewerConfig {
	let Some(text) = read_config_element() else {
		return ViewerConfig::default();
	};
	match ViewerConfig::from_json(&text) {
		Ok(config) => {
			info!("sentiment-graph: using inline viewer config");
			config
		}
		Err(e) => {
			warn!("sentiment-graph: {}, falling back to defaults", e);
			ViewerConfig::default()
		}
	}
}

fn read_config_element() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config = ViewerConfig::from_json(r#"{"data_url": "data/graph.json"}"#).unwrap();
		assert_eq!(config.data_url, "data/graph.json");
		assert_eq!(config.encoding, EncodingConfig::default());
		assert_eq!(config.slider_cap, 100);
	}

	#[test]
	fn nested_partial_override() {
		let config =
			ViewerConfig::from_json(r#"{"encoding": {"edge_opacity": {"rest": 0.1}}}"#).unwrap();
		assert_eq!(config.encoding.edge_opacity.rest, 0.1);
		assert_eq!(config.encoding.edge_opacity.hover, 0.4);
		assert_eq!(config.encoding.node_size_cap, 50);
	}

	#[test]
	fn unordered_opacities_are_rejected() {
		let err = ViewerConfig::from_json(r#"{"encoding": {"edge_opacity": {"rest": 0.5}}}"#)
			.unwrap_err();
		assert!(matches!(err, GraphError::Config(_)));
	}

	#[test]
	fn malformed_json_is_a_config_error() {
		assert!(matches!(
			ViewerConfig::from_json("not json"),
			Err(GraphError::Config(_))
		));
	}
}
