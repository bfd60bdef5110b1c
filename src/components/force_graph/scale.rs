//! Zoom-dependent scaling for graph visuals.
//!
//! Sizes are expressed in world units and drawn after the canvas transform, so
//! anything that should keep a fixed on-screen size is divided by the zoom
//! level `k` here rather than in the renderer.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for a base value at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Alpha multiplier that fades in between two zoom levels.
#[derive(Clone, Debug)]
pub struct ZoomFade {
	pub zero_alpha_k: f64,
	pub full_alpha_k: f64,
}

impl ZoomFade {
	pub fn apply(&self, k: f64) -> f64 {
		if self.zero_alpha_k == self.full_alpha_k {
			return 1.0;
		}
		((k - self.zero_alpha_k) / (self.full_alpha_k - self.zero_alpha_k)).clamp(0.0, 1.0)
	}
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Base node radius in world units, multiplied by each node's size.
	pub node_radius: f64,
	pub node_radius_behavior: ScaleBehavior,
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Node border width in screen pixels.
	pub border_width: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
	pub label_min_k: f64,
	/// Labels of non-highlighted nodes fade out when zoomed out this far.
	pub label_fade: ZoomFade,
	/// Edge line width in screen pixels.
	pub edge_width: f64,
	/// Arrowhead size in world units.
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	pub arrow_fade: ZoomFade,
	/// Selection ring width and offset in screen pixels.
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 6.0,
			node_radius_behavior: ScaleBehavior::Clamped {
				min_screen: 4.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: 12.0,
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			border_width: 2.0,
			label_size: 14.0,
			label_min_k: 0.5,
			label_fade: ZoomFade {
				zero_alpha_k: 0.35,
				full_alpha_k: 0.7,
			},
			edge_width: 1.0,
			arrow_size: 5.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 0.0,
				max_screen: 14.0,
			},
			arrow_fade: ZoomFade {
				zero_alpha_k: 0.2,
				full_alpha_k: 0.6,
			},
			ring_width: 2.0,
			ring_offset: 3.0,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom factor these values were computed for.
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	pub border_width: f64,
	pub label_font: String,
	pub label_alpha: f64,
	pub edge_line_width: f64,
	pub arrow_size: f64,
	pub arrow_alpha: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_font_size = config.label_size / k.max(config.label_min_k);
		Self {
			k,
			node_radius: config.node_radius_behavior.apply(config.node_radius, k),
			hit_radius: config.hit_behavior.apply(config.hit_radius, k),
			border_width: ScaleBehavior::Screen.apply(config.border_width, k),
			label_font: format!("{}px sans-serif", label_font_size),
			label_alpha: config.label_fade.apply(k),
			edge_line_width: ScaleBehavior::Screen.apply(config.edge_width, k),
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
			arrow_alpha: config.arrow_fade.apply(k),
			ring_width: ScaleBehavior::Screen.apply(config.ring_width, k),
			ring_offset: ScaleBehavior::Screen.apply(config.ring_offset, k),
		}
	}
}
