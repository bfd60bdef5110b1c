//! Visual theming for the canvas.
//!
//! Node and edge colors come from the sentiment encoding; the theme only
//! covers the surroundings: background, labels, tooltips and rings.

use crate::encoding::Color;

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Centre color of the radial gradient
	pub color_secondary: Color,
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Label and tooltip text style.
#[derive(Clone, Debug)]
pub struct TextStyle {
	pub label: Color,
	pub tooltip_text: Color,
	pub tooltip_background: Color,
	pub tooltip_border: Color,
	/// Tooltip font size in screen pixels.
	pub tooltip_size: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub text: TextStyle,
	/// Ring drawn around the selected node
	pub selection_ring: Color,
	/// Ring drawn around the hovered node
	pub hover_ring: Color,
	/// How much non-highlighted elements dim while something is hovered
	pub dim_factor: f64,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::hex(0x0f172a),
				color_secondary: Color::hex(0x1e293b),
				use_gradient: true,
				vignette: 0.15,
			},
			text: TextStyle {
				label: Color::hex(0xf1f5f9),
				tooltip_text: Color::hex(0xf1f5f9),
				tooltip_background: Color::hex(0x1e293b).with_alpha(0.92),
				tooltip_border: Color::hex(0x475569),
				tooltip_size: 12.0,
			},
			selection_ring: Color::hex(0xffffff).with_alpha(0.9),
			hover_ring: Color::hex(0xffffff).with_alpha(0.6),
			dim_factor: 0.6,
		}
	}
}
