use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ACTIVE_GROWTH, ForceGraphState, LinkInfo};

const BACKGROUND: &str = "#120a2f";
const HIGH_VALUE_RGB: &str = "255, 0, 0";
const REGULAR_RGB: &str = "255, 255, 255";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

/// Base alpha and width (before zoom) of a link.
fn link_style(link: &LinkInfo) -> (&'static str, f64, f64) {
	if link.high_value {
		(HIGH_VALUE_RGB, 0.5, 1.0)
	} else {
		(REGULAR_RGB, 0.1, 0.4)
	}
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap, arrow_size) = (8.0 / k, 4.0 / k, 3.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let positions = state.positions();

	for link in &state.links {
		let (Some(&(x1, y1, r1)), Some(&(x2, y2, r2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		let (rgb, base_alpha, base_width) = link_style(link);
		let is_highlighted =
			state.is_highlighted(link.source) && state.is_highlighted(link.target);

		// t=0: every link at its base alpha, t=1: highlighted links near opaque, others faded
		let (alpha, width) = if is_highlighted {
			(base_alpha + (0.9 - base_alpha) * t, base_width * (1.0 + 0.5 * t))
		} else {
			(base_alpha * (1.0 - 0.75 * t), base_width * (1.0 - 0.3 * t))
		};
		ctx.set_stroke_style_str(&format!("rgba({rgb}, {alpha})"));
		ctx.set_line_width(width / k.sqrt());

		if link.source == link.target {
			ctx.begin_path();
			let _ = ctx.arc(x1, y1 - r1 * 1.6, r1, 0.0, 2.0 * PI);
			ctx.stroke();
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", 0.4 + 0.5 * alpha));
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_label(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, id: &str, x: f64, y: f64, alpha: f64) {
	let k = state.transform.k;
	if k <= state.label_zoom {
		return;
	}
	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {alpha})"));
	ctx.set_font(&format!("{}px sans-serif", 10.0 / k));
	ctx.set_text_align("center");
	let _ = ctx.fill_text(id, x, y);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let alpha = if has_highlight { 1.0 - 0.7 * t } else { 1.0 };
		let radius = if state.is_selected(idx) {
			info.radius + ACTIVE_GROWTH
		} else {
			info.radius * (1.0 - 0.15 * t)
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color);
		ctx.fill();
		if info.outlined {
			ctx.set_line_width(1.5 / k.sqrt());
			ctx.set_stroke_style_str("#ffffff");
			ctx.stroke();
		}
		ctx.set_global_alpha(1.0);

		draw_label(state, ctx, &info.id, x, y + radius + 6.0 / k, alpha * 0.8);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered || state.is_selected(idx) {
			(
				info.radius + ACTIVE_GROWTH * t,
				info.radius * (1.8 + 1.2 * t) + ACTIVE_GROWTH,
			)
		} else if is_neighbor {
			(info.radius * (1.0 + 0.2 * t), info.radius * (1.4 + 0.6 * t))
		} else {
			(info.radius, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {alpha})"));
				let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color);
		ctx.fill();

		if info.outlined || (is_hovered && t > 0.01) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 1.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", if info.outlined { 1.0 } else { 0.7 * t }));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		draw_label(state, ctx, &info.id, x, y + radius + 6.0 / k, 1.0);
	});
}
