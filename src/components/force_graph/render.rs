//! Canvas rendering for the force graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges with arrowheads (world space)
//! 3. Resting nodes, then hovered/selected nodes on top
//! 4. Vignette and hover tooltip (screen space)

use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{EdgeVisual, ForceGraphState, NodeVisual};
use super::theme::Theme;
use crate::encoding::Color;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
	draw_tooltip(state, ctx, &scale, theme);
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8)
				.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		state.width.min(state.height) * 0.3,
		cx,
		cy,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.background.vignette),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Edge color for the current interaction state: highlight when touching the
/// selection, otherwise rest blended towards hover by the hover intensity.
fn edge_state_color(
	state: &ForceGraphState,
	theme: &Theme,
	edge: &EdgeVisual,
	idx1: DefaultNodeIdx,
	idx2: DefaultNodeIdx,
) -> Color {
	if state.is_selected_edge(idx1, idx2) {
		return edge.colors.highlight;
	}
	let edge_t = smooth_step(state.highlight.edge_intensity(idx1, idx2));
	if edge_t > 0.01 {
		return edge.colors.rest.lerp(edge.colors.hover, edge_t);
	}
	let max_t = smooth_step(state.highlight.max_intensity());
	let rest = edge.colors.rest;
	rest.with_alpha(rest.a * (1.0 - theme.dim_factor * max_t))
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	state.graph.visit_edges(|n1, n2, edge| {
		let color = edge_state_color(state, theme, &edge.user_data, n1.index(), n2.index());
		draw_edge(ctx, scale, n1, n2, color);
	});

	if state.self_loops.is_empty() {
		return;
	}
	state.graph.visit_nodes(|node| {
		for (idx, visual) in &state.self_loops {
			if *idx == node.index() {
				let color = edge_state_color(state, theme, visual, *idx, *idx);
				draw_self_loop(ctx, scale, node, color);
			}
		}
	});
}

/// A small circle hanging off the node's upper right.
fn draw_self_loop(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	node: &force_graph::Node<NodeVisual>,
	color: Color,
) {
	let r = scale.node_radius * node.data.user_data.size;
	let loop_r = r * 0.7;
	let (cx, cy) = (node.x() as f64 + r * 0.8, node.y() as f64 - r * 0.8);

	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(scale.edge_line_width);
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, loop_r, 0.0, 2.0 * PI);
	ctx.stroke();
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	n1: &force_graph::Node<NodeVisual>,
	n2: &force_graph::Node<NodeVisual>,
	color: Color,
) {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let r1 = scale.node_radius * n1.data.user_data.size;
	let r2 = scale.node_radius * n2.data.user_data.size;
	let draw_arrow = scale.arrow_alpha > 0.05 && dist > r1 + r2 + scale.arrow_size;

	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(scale.edge_line_width);
	ctx.begin_path();
	ctx.move_to(x1 + ux * r1, y1 + uy * r1);
	let end = if draw_arrow { r2 + scale.arrow_size } else { r2 };
	ctx.line_to(x2 - ux * end, y2 - uy * end);
	ctx.stroke();

	if draw_arrow {
		let arrow_color = color.with_alpha(color.a * scale.arrow_alpha);
		ctx.set_fill_style_str(&arrow_color.to_css());

		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
		let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let dim_alpha = 1.0 - theme.dim_factor * max_t;

	// Pass 1: resting nodes
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if state.highlight.node_intensity(idx) > 0.001 || state.selected == Some(idx) {
			return;
		}
		draw_node(ctx, node, scale, theme, 0.0, dim_alpha, dim_alpha * scale.label_alpha);
	});

	// Pass 2: hovered neighborhood and selection on top
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let is_selected = state.selected == Some(idx);
		let node_t = smooth_step(state.highlight.node_intensity(idx));
		if node_t <= 0.001 && !is_selected {
			return;
		}

		let highlight_t = if is_selected { 1.0 } else { node_t };
		let alpha = dim_alpha + (1.0 - dim_alpha) * highlight_t;
		draw_node(ctx, node, scale, theme, highlight_t, alpha, alpha);

		let radius = scale.node_radius * node.data.user_data.size;
		if is_selected {
			draw_ring(ctx, node, radius + scale.ring_offset, scale.ring_width, theme.selection_ring);
		} else if state.highlight.hovered_node == Some(idx) {
			let ring = theme.hover_ring.with_alpha(theme.hover_ring.a * node_t);
			draw_ring(ctx, node, radius + scale.ring_offset, scale.ring_width * 0.75, ring);
		}
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeVisual>,
	scale: &ScaledValues,
	theme: &Theme,
	highlight_t: f64,
	alpha: f64,
	label_alpha: f64,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let visual = &node.data.user_data;
	let radius = scale.node_radius * visual.size * (1.0 + 0.15 * highlight_t);
	let fill = visual
		.colors
		.background
		.lerp(visual.colors.highlight_background, highlight_t);
	let border = visual
		.colors
		.border
		.lerp(visual.colors.highlight_border, highlight_t);

	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&fill.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&border.to_css());
	ctx.set_line_width(scale.border_width * (1.0 + highlight_t));
	ctx.stroke();

	if label_alpha > 0.05 {
		ctx.set_global_alpha(label_alpha);
		ctx.set_fill_style_str(&theme.text.label.to_css());
		ctx.set_font(&scale.label_font);
		let _ = ctx.fill_text(&visual.label, x + radius + 4.0, y + 4.0);
	}

	ctx.set_global_alpha(1.0);
}

fn draw_ring(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeVisual>,
	radius: f64,
	width: f64,
	color: Color,
) {
	ctx.begin_path();
	let _ = ctx.arc(node.x() as f64, node.y() as f64, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.stroke();
}

/// Tooltip with the hovered node's title, drawn in screen space.
fn draw_tooltip(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let Some(hovered) = state.highlight.hovered_node else {
		return;
	};
	if state.drag.active {
		return;
	}

	let mut anchor = None;
	state.graph.visit_nodes(|node| {
		if node.index() == hovered {
			let radius = scale.node_radius * node.data.user_data.size * scale.k;
			anchor = Some((
				node.x() as f64 * scale.k + state.transform.x,
				node.y() as f64 * scale.k + state.transform.y + radius,
				node.data.user_data.title.clone(),
			));
		}
	});
	let Some((sx, sy, title)) = anchor else {
		return;
	};

	let size = theme.text.tooltip_size;
	let lines: Vec<&str> = title.lines().collect();
	let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
	let (pad, line_height) = (6.0, size * 1.3);
	let (w, h) = (widest * size * 0.6 + 2.0 * pad, lines.len() as f64 * line_height + 2.0 * pad);
	let (left, top) = ((sx - w / 2.0).clamp(0.0, (state.width - w).max(0.0)), sy + 8.0);

	ctx.set_fill_style_str(&theme.text.tooltip_background.to_css());
	ctx.fill_rect(left, top, w, h);
	ctx.set_stroke_style_str(&theme.text.tooltip_border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(left, top, w, h);

	ctx.set_fill_style_str(&theme.text.tooltip_text.to_css());
	ctx.set_font(&format!("{}px sans-serif", size));
	for (i, line) in lines.iter().enumerate() {
		let baseline = top + pad + size + i as f64 * line_height;
		let _ = ctx.fill_text(line, left + pad, baseline);
	}
}
