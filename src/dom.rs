use crate::constants::{EMBED_CANVAS_CLASS, SCENE_CONFIG_ATTR};
use crate::input::{self, PointerArea};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn device_pixel_ratio() -> f64 {
    input::effective_pixel_ratio(web::window().map_or(1.0, |w| w.device_pixel_ratio()))
}

/// Window inner size in CSS pixels.
pub fn window_inner_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (dim(w.inner_width()), dim(w.inner_height()))
}

pub fn element_area(el: &web::Element) -> PointerArea {
    let rect = el.get_bounding_client_rect();
    PointerArea {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

pub fn window_area() -> PointerArea {
    let (w, h) = window_inner_size();
    PointerArea::window(w as f32, h as f32)
}

/// Raw override JSON from the mount element, if any.
pub fn scene_config_attr(el: &web::Element) -> Option<String> {
    el.get_attribute(SCENE_CONFIG_ATTR)
}

/// Use `el` directly when it is a canvas, otherwise append a fresh canvas
/// filling the container.
pub fn canvas_for(
    document: &web::Document,
    el: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(canvas) = el.dyn_ref::<web::HtmlCanvasElement>() {
        return Ok(canvas.clone());
    }
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_class_name(EMBED_CANVAS_CLASS);
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    el.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

/// Set the canvas backing store for a CSS box and pin its CSS size so the
/// browser doesn't stretch it. Returns the backing size in device pixels.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    css_width: f64,
    css_height: f64,
) -> (u32, u32) {
    let (w_px, h_px) = input::backing_size(css_width, css_height, device_pixel_ratio());
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    let style = canvas.style();
    _ = style.set_property("width", &format!("{css_width}px"));
    _ = style.set_property("height", &format!("{css_height}px"));
    (w_px, h_px)
}

/// CSS size of a container, as laid out right now.
pub fn container_size(el: &web::Element) -> (f64, f64) {
    let rect = el.get_bounding_client_rect();
    (rect.width(), rect.height())
}
