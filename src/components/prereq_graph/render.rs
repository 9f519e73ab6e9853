//! Canvas rendering for the prerequisite graph.
//!
//! Passes, back to front:
//! 1. Background (screen space)
//! 2. Links, dimmed ones first so emphasised links sit on top
//! 3. Nodes and their labels, dimmed ones first

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::palette::{self, LinkRole, NodeRole, Palette};
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{GraphViewState, NodeInfo};

/// Renders the complete graph to the canvas.
pub fn render(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	palette: &Palette,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	ctx.set_fill_style_str(&palette.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	for dimmed_pass in [true, false] {
		state.graph.visit_edges(|n1, n2, _| {
			let role = palette::link_role(
				&n1.data.user_data.id,
				&n2.data.user_data.id,
				&state.highlight,
				&state.focus,
			);
			if (role == LinkRole::Dimmed) == dimmed_pass {
				draw_link(ctx, config, &scale, palette, role, n1, n2);
			}
		});
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	for dimmed_pass in [true, false] {
		state.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			let role = palette::node_role(&info.id, &state.highlight, &state.focus);
			if (role == NodeRole::Dimmed) == dimmed_pass {
				draw_node(ctx, &scale, palette, role, node);
			}
		});
	}

	ctx.restore();
}

fn draw_link(
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	palette: &Palette,
	role: LinkRole,
	n1: &force_graph::Node<NodeInfo>,
	n2: &force_graph::Node<NodeInfo>,
) {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}

	let color = palette.link_color(role).to_css();
	ctx.set_stroke_style_str(&color);
	ctx.set_fill_style_str(&color);
	ctx.set_line_width(scale.line_width(palette::link_width(role)));

	if n1.data.user_data.placed && n2.data.user_data.placed {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(scale.dash_pattern.0),
			&JsValue::from_f64(scale.dash_pattern.1),
		));
	}

	let (ux, uy) = (dx / dist, dy / dist);
	let offset = scale.node_radius;

	// Quadratic curve bent to the left of the direction of travel.
	let bend = dist * config.curvature;
	let (cx, cy) = ((x1 + x2) / 2.0 - uy * bend, (y1 + y2) / 2.0 + ux * bend);

	let (start_x, start_y) = toward(x1, y1, cx, cy, offset);
	let (tip_x, tip_y) = toward(x2, y2, cx, cy, offset);

	ctx.begin_path();
	ctx.move_to(start_x, start_y);
	let _ = ctx.quadratic_curve_to(cx, cy, tip_x, tip_y);
	ctx.stroke();

	// Arrow head along the curve's tangent at the target end.
	let (tx, ty) = (tip_x - cx, tip_y - cy);
	let tangent = (tx * tx + ty * ty).sqrt().max(0.001);
	let (ax, ay) = (tx / tangent, ty / tangent);
	let (back_x, back_y) = (tip_x - ax * scale.arrow_size, tip_y - ay * scale.arrow_size);
	let (px, py) = (-ay * scale.arrow_size * 0.5, ax * scale.arrow_size * 0.5);

	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

/// Point `distance` away from `(x, y)` in the direction of `(tx, ty)`.
fn toward(x: f64, y: f64, tx: f64, ty: f64, distance: f64) -> (f64, f64) {
	let (dx, dy) = (tx - x, ty - y);
	let len = (dx * dx + dy * dy).sqrt();
	if len < 0.001 {
		return (x, y);
	}
	(x + dx / len * distance, y + dy / len * distance)
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	palette: &Palette,
	role: NodeRole,
	node: &force_graph::Node<NodeInfo>,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);

	ctx.begin_path();
	let _ = ctx.arc(x, y, scale.node_radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&palette.node_color(role).to_css());
	ctx.fill();

	let label_color = if role == NodeRole::Dimmed {
		palette.label.with_alpha(0.45)
	} else {
		palette.label
	};
	ctx.set_fill_style_str(&label_color.to_css());
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&node.data.user_data.label, x, y + scale.label_offset);
}
