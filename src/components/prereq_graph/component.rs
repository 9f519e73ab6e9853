//! Leptos components for the prerequisite graph panel.
//!
//! [`PrereqGraph`] loads the graph whenever the focus course or source
//! changes and shows an explicit loading, error or empty state instead of a
//! stale canvas. [`GraphCanvas`] draws a ready graph and wires up mouse and
//! wheel handlers for panning, zooming, dragging and click selection. An
//! animation loop runs via `requestAnimationFrame` until the canvas unmounts.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::fetch::{GraphSource, RequestGeneration};
use super::frame::{FrameLoop, PendingFrame};
use super::highlight::HighlightSummary;
use super::layout::Spacing;
use super::palette::Palette;
use super::prepared::{PreparedGraph, ViewState};
use super::render;
use super::scale::ScaleConfig;
use super::state::{CLICK_TOLERANCE, GraphViewState};

/// Current page URL, used to resolve relative graph endpoints.
fn page_url() -> Option<String> {
	web_sys::window()?.location().href().ok()
}

/// Loads and displays the prerequisite graph of `focus_id`.
#[component]
pub fn PrereqGraph(
	/// Course to center on; `None` shows the idle prompt.
	#[prop(into)]
	focus_id: Signal<Option<String>>,
	/// Where graphs are loaded from.
	#[prop(into)]
	source: Signal<GraphSource>,
	/// Grid spacing in world units.
	#[prop(default = Spacing::default())]
	spacing: Spacing,
	/// Canvas width in pixels.
	#[prop(default = 800.0)]
	width: f64,
	/// Canvas height in pixels.
	#[prop(default = 600.0)]
	height: f64,
) -> impl IntoView {
	let view_state = RwSignal::new(ViewState::Idle);
	let generation = Arc::new(RequestGeneration::default());

	Effect::new(move |_| {
		let focus = focus_id.get();
		let source = source.get();
		let ticket = generation.begin();

		let Some(focus) = focus else {
			view_state.set(ViewState::Idle);
			return;
		};

		info!("prereq-graph: loading {} from {}", focus, source.describe());
		view_state.set(ViewState::Loading);

		let generation = generation.clone();
		spawn_local(async move {
			let result = source.load(&focus, page_url().as_deref()).await;
			match generation.settle(ticket, result) {
				Some(result) => view_state.set(ViewState::resolve(result, &focus, spacing)),
				None => debug!("prereq-graph: discarding stale response for {}", focus),
			}
		});
	});

	move || match view_state.get() {
		ViewState::Idle => view! {
			<div class="graph-status">"Select a course to see its prerequisites."</div>
		}
		.into_any(),
		ViewState::Loading => view! { <div class="graph-status">"Loading…"</div> }.into_any(),
		ViewState::Failed(e) => view! {
			<div class="graph-status graph-error">"Error: " {e.to_string()}</div>
		}
		.into_any(),
		ViewState::Empty => view! {
			<div class="graph-status">"No prerequisite data for this course."</div>
		}
		.into_any(),
		ViewState::Ready(prepared) => view! {
			<GraphCanvas prepared=prepared width=width height=height />
		}
		.into_any(),
	}
}

/// Bundles graph state with visual configuration.
struct GraphContext {
	state: GraphViewState,
	scale: ScaleConfig,
	palette: Palette,
}

/// Canvas, legend and interaction handlers for a ready graph.
#[component]
pub fn GraphCanvas(
	/// Laid-out graph to draw.
	prepared: PreparedGraph,
	/// Canvas width in pixels.
	width: f64,
	/// Canvas height in pixels.
	height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let frames: FrameLoop<Closure<dyn FnMut()>> = FrameLoop::default();
	let pending = Arc::new(PendingFrame::default());
	let alive = Arc::new(AtomicBool::new(true));
	let summary = RwSignal::new(HighlightSummary::default());
	let (node_count, link_count) = (prepared.data.nodes.len(), prepared.data.links.len());

	let (alive_cleanup, pending_cleanup) = (alive.clone(), pending.clone());
	on_cleanup(move || {
		alive_cleanup.store(false, Ordering::Relaxed);
		if let (Some(id), Some(window)) = (pending_cleanup.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
	});

	// The effect owns `frames`; disposing it drops the loop and its context.
	let context_init = context.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("prereq-graph: canvas 2d context unavailable");
			return;
		};

		*context_init.borrow_mut() = Some(GraphContext {
			state: GraphViewState::new(&prepared, width, height),
			scale: ScaleConfig::default(),
			palette: Palette::default(),
		});

		if let Some(id) = pending.take() {
			let _ = window.cancel_animation_frame(id);
		}
		let (context_anim, pending_anim, alive) = (context_init.clone(), pending.clone(), alive.clone());
		frames.install(|handle| {
			Closure::new(move || {
				if !alive.load(Ordering::Relaxed) {
					return;
				}
				if let Some(ref mut c) = *context_anim.borrow_mut() {
					c.state.tick(0.016);
					render::render(&c.state, &ctx, &c.scale, &c.palette);
				}
				let Some(win) = web_sys::window() else {
					return;
				};
				handle.with(|cb: &Closure<dyn FnMut()>| {
					if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
						pending_anim.set(id);
					}
				});
			})
		});
		frames.with(|cb| {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				pending.set(id);
			}
		});
	});

	let pointer = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
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
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				let (sdx, sdy) = (x - c.state.drag.start_x, y - c.state.drag.start_y);
				if !c.state.drag.moved && sdx.hypot(sdy) < CLICK_TOLERANCE {
					return;
				}
				c.state.drag.moved = true;
				if let Some(idx) = c.state.drag.node_idx {
					let k = c.state.transform.k;
					let (nx, ny) = (
						c.state.drag.node_start_x + (sdx / k) as f32,
						c.state.drag.node_start_y + (sdy / k) as f32,
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
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.state.drag.active && !c.state.drag.moved {
				if let Some(idx) = c.state.drag.node_idx {
					summary.set(c.state.toggle_selection(idx));
				}
			}
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
		}
	};

	let context_dbl = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_dbl.borrow_mut() {
			if c.state.node_at_position(x, y, &c.scale).is_none() {
				summary.set(c.state.clear_selection());
			}
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let Some((x, y)) = pointer(mouse) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<div class="graph-container">
			<canvas
				node_ref=canvas_ref
				class="prereq-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:dblclick=on_dblclick
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-legend">
				<p>{format!("Nodes: {} • Edges: {}", node_count, link_count)}</p>
				{move || {
					let s = summary.get();
					s.selected.clone().map(|selected| {
						view! {
							<p>
								"Selected " <span class="graph-selected">{selected}</span>
								{format!(" — Ancestors: {} • Descendants: {}", s.ancestors, s.descendants)}
							</p>
						}
					})
				}}
			</div>
		</div>
	}
}
