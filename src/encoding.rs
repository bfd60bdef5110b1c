//! Visual encoding rules: sentiment tallies and labels to colors and sizes.
//!
//! Everything here is a pure function of its inputs so the same dataset always
//! renders the same way.

use serde::{Deserialize, Serialize};

use crate::dataset::{Sentiment, SentimentTally};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color from components.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Opaque color from a `0xRRGGBB` literal.
	pub const fn hex(rgb: u32) -> Self {
		Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
	}

	/// Same color with a different opacity, clamped to `[0, 1]`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |x: u8, y: u8| (x as f64 * (1.0 - t) + y as f64 * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// CSS representation: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node coloring bucket derived from its sentiment tallies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorCategory {
	/// Strictly more than half of the tallied comments are positive.
	DominantPositive,
	/// Strictly more than half of the tallied comments are negative.
	DominantNegative,
	/// No strict majority.
	Mixed,
	/// No tallied comments at all.
	Isolated,
}

impl ColorCategory {
	/// Legend order.
	pub const ALL: [ColorCategory; 4] = [
		ColorCategory::DominantPositive,
		ColorCategory::DominantNegative,
		ColorCategory::Mixed,
		ColorCategory::Isolated,
	];

	/// Human-readable legend text.
	pub fn legend(self) -> &'static str {
		match self {
			ColorCategory::DominantPositive => "Mostly positive",
			ColorCategory::DominantNegative => "Mostly negative",
			ColorCategory::Mixed => "Mixed",
			ColorCategory::Isolated => "No sentiment data",
		}
	}
}

/// Fill and stroke colors for a node at rest and when highlighted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeColors {
	/// Fill at rest.
	pub background: Color,
	/// Outline at rest.
	pub border: Color,
	/// Fill when hovered or selected.
	pub highlight_background: Color,
	/// Outline when hovered or selected.
	pub highlight_border: Color,
}

/// Edge stroke colors for the three interaction states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeColors {
	/// Nothing hovered or selected.
	pub rest: Color,
	/// Edge touches the hovered neighborhood.
	pub hover: Color,
	/// Edge touches the selected node.
	pub highlight: Color,
}

/// Edge opacities for the three interaction states. Must satisfy `rest < hover < highlight`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOpacity {
	/// Opacity of an idle edge.
	pub rest: f64,
	/// Opacity of an edge next to the hovered node.
	pub hover: f64,
	/// Opacity of an edge touching the selected node.
	pub highlight: f64,
}

impl Default for EdgeOpacity {
	fn default() -> Self {
		Self {
			rest: 0.2,
			hover: 0.4,
			highlight: 0.6,
		}
	}
}

impl EdgeOpacity {
	/// True when every opacity is in `[0, 1]` and the states are strictly ordered.
	pub fn is_valid(&self) -> bool {
		let in_range = [self.rest, self.hover, self.highlight]
			.iter()
			.all(|a| (0.0..=1.0).contains(a));
		in_range && self.rest < self.hover && self.hover < self.highlight
	}
}

const POSITIVE_RGB: Color = Color::rgb(16, 185, 129);
const NEGATIVE_RGB: Color = Color::rgb(239, 68, 68);
const NEUTRAL_RGB: Color = Color::rgb(245, 158, 11);

/// Classify a node by strict majority of its sentiment tallies.
///
/// Exact halves are not a majority and land in [`ColorCategory::Mixed`].
pub fn node_color_category(sentiments: &SentimentTally) -> ColorCategory {
	let total = sentiments.total();
	if total == 0 {
		return ColorCategory::Isolated;
	}
	// 2x > total is the exact form of x / total > 0.5
	if 2 * sentiments.positive as u64 > total {
		ColorCategory::DominantPositive
	} else if 2 * sentiments.negative as u64 > total {
		ColorCategory::DominantNegative
	} else {
		ColorCategory::Mixed
	}
}

/// Palette for each node category.
pub fn node_colors(category: ColorCategory) -> NodeColors {
	let (background, border, highlight_background, highlight_border) = match category {
		ColorCategory::Isolated => (0x6366f1, 0x8b5cf6, 0x8b5cf6, 0xa855f7),
		ColorCategory::DominantPositive => (0x10b981, 0x059669, 0x34d399, 0x10b981),
		ColorCategory::DominantNegative => (0xef4444, 0xdc2626, 0xf87171, 0xef4444),
		ColorCategory::Mixed => (0xf59e0b, 0xd97706, 0xfbbf24, 0xf59e0b),
	};
	NodeColors {
		background: Color::hex(background),
		border: Color::hex(border),
		highlight_background: Color::hex(highlight_background),
		highlight_border: Color::hex(highlight_border),
	}
}

/// Base color for a raw sentiment label. Anything but positive/negative is neutral.
pub fn sentiment_color(label: &str) -> Color {
	match Sentiment::parse(label) {
		Some(Sentiment::Positive) => POSITIVE_RGB,
		Some(Sentiment::Negative) => NEGATIVE_RGB,
		_ => NEUTRAL_RGB,
	}
}

/// Edge color for a sentiment label at the given opacity.
pub fn edge_color(label: &str, opacity: f64) -> Color {
	sentiment_color(label).with_alpha(opacity)
}

/// Rest/hover/highlight colors for an edge's comment sentiment.
pub fn edge_colors(label: &str, opacity: &EdgeOpacity) -> EdgeColors {
	EdgeColors {
		rest: edge_color(label, opacity.rest),
		hover: edge_color(label, opacity.hover),
		highlight: edge_color(label, opacity.highlight),
	}
}

/// Visual size value: connections capped so hubs do not swamp the canvas.
pub fn node_size_value(connections: u32, cap: u32) -> u32 {
	connections.min(cap)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tally(positive: u32, negative: u32, neutral: u32) -> SentimentTally {
		SentimentTally {
			positive,
			negative,
			neutral,
		}
	}

	#[test]
	fn category_uses_strict_majority() {
		assert_eq!(node_color_category(&tally(0, 0, 0)), ColorCategory::Isolated);
		assert_eq!(node_color_category(&tally(8, 1, 1)), ColorCategory::DominantPositive);
		assert_eq!(node_color_category(&tally(1, 3, 1)), ColorCategory::DominantNegative);
		assert_eq!(node_color_category(&tally(2, 2, 0)), ColorCategory::Mixed);
		assert_eq!(node_color_category(&tally(1, 0, 1)), ColorCategory::Mixed);
		// plurality is not enough
		assert_eq!(node_color_category(&tally(4, 3, 3)), ColorCategory::Mixed);
		assert_eq!(node_color_category(&tally(0, 0, 7)), ColorCategory::Mixed);
	}

	#[test]
	fn category_handles_extreme_tallies() {
		assert_eq!(
			node_color_category(&tally(u32::MAX, u32::MAX - 1, 0)),
			ColorCategory::DominantPositive
		);
	}

	#[test]
	fn edge_color_matches_label_case_insensitively() {
		assert_eq!(edge_color("Positive", 0.2).to_css(), "rgba(16, 185, 129, 0.2)");
		assert_eq!(edge_color("NEGATIVE", 0.6).to_css(), "rgba(239, 68, 68, 0.6)");
		assert_eq!(edge_color("neutral", 0.4).to_css(), "rgba(245, 158, 11, 0.4)");
		assert_eq!(edge_color("sarcastic", 1.0).to_css(), "#f59e0b");
		assert_eq!(edge_color("", 1.0), NEUTRAL_RGB);
	}

	#[test]
	fn edge_states_are_ordered_by_opacity() {
		let colors = edge_colors("positive", &EdgeOpacity::default());
		assert!(colors.rest.a < colors.hover.a);
		assert!(colors.hover.a < colors.highlight.a);
		assert!(EdgeOpacity::default().is_valid());
		assert!(
			!EdgeOpacity {
				rest: 0.5,
				hover: 0.5,
				highlight: 0.9
			}
			.is_valid()
		);
	}

	#[test]
	fn opacity_is_clamped() {
		assert_eq!(edge_color("positive", 3.0).a, 1.0);
		assert_eq!(edge_color("positive", -1.0).a, 0.0);
	}

	#[test]
	fn size_value_is_capped() {
		assert_eq!(node_size_value(10, 50), 10);
		assert_eq!(node_size_value(50, 50), 50);
		assert_eq!(node_size_value(900, 50), 50);
	}

	#[test]
	fn isolated_palette_is_indigo() {
		assert_eq!(node_colors(ColorCategory::Isolated).background.to_css(), "#6366f1");
		assert_eq!(
			node_colors(ColorCategory::DominantNegative).highlight_background.to_css(),
			"#f87171"
		);
	}
}
