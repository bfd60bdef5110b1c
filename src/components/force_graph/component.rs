//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming and click selection. An
//! animation loop runs via `requestAnimationFrame`, stepping the physics
//! simulation and renderer each frame. Subgraph changes are applied to the
//! running simulation without restarting the loop.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::{CLICK_TOLERANCE, ForceGraphState};
use super::theme::Theme;
use crate::config::SimulationConfig;
use crate::filter::Subgraph;

/// Camera and physics commands issued from outside the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewCommand {
	/// Zoom in around the canvas centre.
	ZoomIn,
	/// Zoom out around the canvas centre.
	ZoomOut,
	/// Fit every visible node into view.
	Fit,
	/// Run or freeze the force simulation.
	SetPhysics(bool),
}

const ZOOM_IN_FACTOR: f64 = 1.2;
const ZOOM_OUT_FACTOR: f64 = 0.8;
/// Largest frame step fed to the simulation, so a backgrounded tab does not explode the layout.
const MAX_DT: f64 = 0.05;

/// Bundles graph simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
	last_frame_ms: f64,
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
	let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
	(w, h)
}

fn pointer_position(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

/// Renders the visible subgraph on a canvas element.
///
/// `data` is re-applied whenever it changes; nodes that stay visible keep
/// their position. Clicking a node reports its id through `on_select`,
/// clicking the background reports `None`. `selected` mirrors the selection
/// held by the parent so it can be cleared from outside.
#[component]
pub fn ForceGraphCanvas(
	/// Subgraph to lay out and draw.
	#[prop(into)]
	data: Signal<Subgraph>,
	/// Id of the selected node.
	#[prop(into)]
	selected: Signal<Option<String>>,
	/// Latest camera or physics command.
	#[prop(into)]
	commands: Signal<Option<ViewCommand>>,
	/// Called with the clicked node id, or `None` for a background click.
	#[prop(optional)]
	on_select: Option<Callback<Option<String>>>,
	/// Force simulation tuning.
	#[prop(default = SimulationConfig::default())]
	simulation: SimulationConfig,
	/// Size the canvas to the window instead of its parent.
	#[prop(default = false)]
	fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window)
		} else {
			canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or((800.0, 600.0))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("sentiment-graph: canvas 2d context unavailable");
			return;
		};

		let mut state = ForceGraphState::new(&data.get_untracked(), w, h, &simulation);
		state.select_id(selected.get_untracked().as_deref());
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			last_frame_ms: js_sys::Date::now(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let now = js_sys::Date::now();
				let dt = ((now - c.last_frame_ms) / 1000.0).clamp(0.0, MAX_DT);
				c.last_frame_ms = now;
				c.state.tick(dt as f32);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_data = context.clone();
	Effect::new(move |_| {
		let subgraph = data.get();
		if let Some(ref mut c) = *context_data.borrow_mut() {
			c.state.set_data(&subgraph);
			c.state.fit();
		}
	});

	let context_sel = context.clone();
	Effect::new(move |_| {
		let id = selected.get();
		if let Some(ref mut c) = *context_sel.borrow_mut() {
			c.state.select_id(id.as_deref());
		}
	});

	let context_cmd = context.clone();
	Effect::new(move |_| {
		let Some(command) = commands.get() else {
			return;
		};
		if let Some(ref mut c) = *context_cmd.borrow_mut() {
			match command {
				ViewCommand::ZoomIn => c.state.zoom_by(ZOOM_IN_FACTOR),
				ViewCommand::ZoomOut => c.state.zoom_by(ZOOM_OUT_FACTOR),
				ViewCommand::Fit => c.state.fit(),
				ViewCommand::SetPhysics(enabled) => c.state.physics_enabled = enabled,
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, ev.client_x(), ev.client_y());

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.state.node_at_position(x, y, &c.scale) {
				c.state.drag.active = true;
				c.state.drag.moved = false;
				c.state.drag.node_idx = Some(idx);
				c.state.drag.start_x = x;
				c.state.drag.start_y = y;
				c.state.graph.visit_nodes(|node| {
					if node.index() == idx {
						c.state.drag.node_start_x = node.x();
						c.state.drag.node_start_y = node.y();
					}
				});
			} else {
				c.state.pan.active = true;
				c.state.pan.moved = false;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, ev.client_x(), ev.client_y());

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if !c.state.drag.active {
				let hovered = c.state.node_at_position(x, y, &c.scale);
				c.state.set_hover(hovered);
			}

			if c.state.drag.active {
				let (sx, sy) = (x - c.state.drag.start_x, y - c.state.drag.start_y);
				if (sx * sx + sy * sy).sqrt() > CLICK_TOLERANCE {
					c.state.drag.moved = true;
				}
				if let (Some(idx), true) = (c.state.drag.node_idx, c.state.drag.moved) {
					let k = c.state.transform.k;
					let (nx, ny) = (
						c.state.drag.node_start_x + (sx / k) as f32,
						c.state.drag.node_start_y + (sy / k) as f32,
					);
					c.state.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if c.state.pan.active {
				let (sx, sy) = (x - c.state.pan.start_x, y - c.state.pan.start_y);
				if (sx * sx + sy * sy).sqrt() > CLICK_TOLERANCE {
					c.state.pan.moved = true;
				}
				c.state.transform.x = c.state.pan.transform_start_x + sx;
				c.state.transform.y = c.state.pan.transform_start_y + sy;
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = {
			let mut guard = context_mu.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let clicked = if c.state.drag.active && !c.state.drag.moved {
				let id = c.state.drag.node_idx.and_then(|idx| c.state.node_id(idx));
				c.state.select_id(id.as_deref());
				Some(id)
			} else if c.state.pan.active && !c.state.pan.moved {
				c.state.select_id(None);
				Some(None)
			} else {
				None
			};
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
			clicked
		};
		// Borrow released before notifying, the parent may touch the canvas state.
		if let (Some(selection), Some(cb)) = (clicked, on_select) {
			cb.run(selection);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
			c.state.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, ev.client_x(), ev.client_y());

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
