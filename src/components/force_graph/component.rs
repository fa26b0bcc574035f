use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use crate::analysis::AccountGraph;
use crate::config::AppConfig;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Client size of the canvas container, or `None` while it is hidden.
fn container_size(canvas: &HtmlCanvasElement, height: Option<f64>) -> Option<(f64, f64)> {
	let parent = canvas.parent_element()?;
	let w = parent.client_width() as f64;
	let h = height.unwrap_or(parent.client_height() as f64);
	(w > 0.0 && h > 0.0).then_some((w, h))
}

/// Mouse position relative to the canvas.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn notify(cb: Option<Callback<Option<String>>>, id: Option<String>) {
	if let Some(cb) = cb {
		cb.run(id);
	}
}

/// Force-directed account graph on a canvas.
///
/// The canvas fills its parent's width; `height` fixes the height instead of
/// taking the parent's. `on_hover` and `on_select` receive the account id
/// under the pointer and the clicked account (`None` on a background click).
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<AccountGraph>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] on_hover: Option<Callback<Option<String>>>,
	#[prop(optional)] on_select: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let (state_init, animate_init, alive_init) = (state.clone(), animate.clone(), alive.clone());

	on_cleanup(move || alive.store(false, Ordering::Relaxed));

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		// Already running: swap the graph, keep the loop and viewport.
		if let Some(ref mut s) = *state_init.borrow_mut() {
			debug!("reloading graph: {} nodes, {} links", graph.nodes.len(), graph.links.len());
			s.load(&graph);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = container_size(&canvas, height).unwrap_or((800.0, height.unwrap_or(600.0)));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};
		debug!("starting graph: {} nodes, {} links", graph.nodes.len(), graph.links.len());
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph, w, h, &config));

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				// Track the container; a hidden view keeps its last size.
				if let Some((nw, nh)) = container_size(&canvas, height) {
					if s.resize(nw, nh) {
						canvas.set_width(nw as u32);
						canvas.set_height(nh as u32);
					}
				}
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		let mut selected = None;
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
				s.selected = Some(idx);
				selected = Some(s.account_id(idx));
			} else {
				s.pan.active = true;
				s.pan.moved = false;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
		if let Some(id) = selected {
			notify(on_select, id);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		let mut hovered = None;
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			// Update hover state when not dragging
			if !s.drag.active {
				let idx = s.node_at_position(x, y);
				if s.set_hover(idx) {
					hovered = Some(idx.and_then(|i| s.account_id(i)));
				}
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.pan.moved = true;
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
		if let Some(id) = hovered {
			notify(on_hover, id);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let mut cleared = false;
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.is_anchor = true;
						}
					});
				}
			}
			// A background click without panning clears the selection.
			if s.pan.active && !s.pan.moved && s.selected.is_some() {
				s.selected = None;
				cleared = true;
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
		if cleared {
			notify(on_select, None);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut left = false;
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			left = s.set_hover(None);
		}
		if left {
			notify(on_hover, None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
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
