use scene_core::{SceneConfig, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const CONFIG_ELEMENT_ID: &str = "scene-config";

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Attach `handler` to `event` on `target` for the lifetime of the page.
pub fn add_listener(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("failed to listen for {event}: {:?}", e);
    }
    closure.forget();
}

pub fn query_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .query_selector(CANVAS_SELECTOR)
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("missing {CANVAS_SELECTOR}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{CANVAS_SELECTOR} is not a canvas: {:?}", e))
}

/// Layout viewport of the window in CSS pixels.
pub fn current_viewport(window: &web::Window, max_pixel_ratio: f64) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    Viewport::new(width, height, window.device_pixel_ratio(), max_pixel_ratio)
}

pub fn set_canvas_backing_size(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    canvas.set_width(width.max(1));
    canvas.set_height(height.max(1));
}

/// Read the optional JSON config block; falls back to defaults on any error.
pub fn read_scene_config(document: &web::Document) -> SceneConfig {
    let Some(el) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return SceneConfig::default();
    };
    let text = el.text_content().unwrap_or_default();
    if text.trim().is_empty() {
        return SceneConfig::default();
    }
    match SceneConfig::from_json(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            SceneConfig::default()
        }
    }
}
