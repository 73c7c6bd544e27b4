//! Gradient image loading for the toon ramp.

use crate::dom::js_err;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch an image by URL and decode it into an `ImageBitmap`.
pub async fn fetch_image_bitmap(url: &str) -> anyhow::Result<web::ImageBitmap> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !response.ok() {
        anyhow::bail!("GET {url}: HTTP {}", response.status());
    }
    let blob: web::Blob = JsFuture::from(response.blob().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let bitmap = JsFuture::from(window.create_image_bitmap_with_blob(&blob).map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into::<web::ImageBitmap>()
        .map_err(js_err)?;
    Ok(bitmap)
}
