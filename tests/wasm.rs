#![cfg(all(target_arch = "wasm32", feature = "web"))]

use glam::{vec2, Affine2};
use phenakisto::input::page_offset;
use phenakisto::render::{Pen, Rgba, Surface};
use phenakisto::web::CanvasSurface;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

// https://rustwasm.github.io/wasm-bindgen/wasm-bindgen-test/browsers.html
wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

fn create<T: JsCast>(tag: &str, style: &str) -> T {
	let element = document().create_element(tag).unwrap();
	element.set_attribute("style", style).unwrap();
	element.dyn_into::<T>().unwrap()
}

fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
	let canvas: HtmlCanvasElement = create("canvas", "");
	canvas.set_width(width);
	canvas.set_height(height);
	canvas
}

fn pixel(canvas: &HtmlCanvasElement, x: u32, y: u32) -> [u8; 4] {
	let context = canvas
		.get_context("2d")
		.unwrap()
		.unwrap()
		.dyn_into::<web_sys::CanvasRenderingContext2d>()
		.unwrap();
	let data = context
		.get_image_data(x as f64, y as f64, 1.0, 1.0)
		.unwrap()
		.data();
	[data[0], data[1], data[2], data[3]]
}

#[wasm_bindgen_test]
fn test_nested_offsets() {
	let panel: HtmlElement = create("div", "position:absolute;left:40px;top:30px");
	let target: HtmlElement = create("canvas", "position:absolute;left:5px;top:7px");
	panel.append_child(&target).unwrap();
	document().body().unwrap().append_child(&panel).unwrap();

	assert_eq!(page_offset(&target) - page_offset(&panel), vec2(5.0, 7.0));
	panel.remove();
}

#[wasm_bindgen_test]
fn test_canvas_surface() {
	let element = canvas(40, 20);
	let mut surface = CanvasSurface::new(element.clone()).unwrap();
	assert_eq!(surface.size(), glam::UVec2::new(40, 20));

	surface.fill_circle(Affine2::from_translation(vec2(10.0, 10.0)), vec2(0.0, 0.0), 5.0, Rgba::RED);
	assert_eq!(pixel(&element, 10, 10), Rgba::RED.0);
	assert_eq!(pixel(&element, 30, 10), Rgba::TRANSPARENT.0);

	let pen = Pen::new(Rgba::BLACK, 4.0);
	surface.stroke_segment(Affine2::IDENTITY, vec2(25.0, 10.0), vec2(38.0, 10.0), &pen);
	assert_eq!(pixel(&element, 30, 10), Rgba::BLACK.0);

	surface.clear();
	assert_eq!(pixel(&element, 10, 10), Rgba::TRANSPARENT.0);
}

#[wasm_bindgen_test]
fn test_single_point_is_a_dot() {
	let element = canvas(20, 20);
	let mut surface = CanvasSurface::new(element.clone()).unwrap();
	surface.stroke_polyline(
		Affine2::from_scale(glam::Vec2::splat(2.0)),
		&[vec2(5.0, 5.0)],
		&Pen::new(Rgba::BLACK, 3.0),
	);
	assert_eq!(pixel(&element, 10, 10), Rgba::BLACK.0);
}
