//! Colour control panel: one colour field bound to the material colour.

use crate::dom;
use scene_core::{CommandQueue, InputCommand, Rgb};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const PANEL_ID: &str = "scene-panel";
const PANEL_STYLE: &str = "position:fixed;top:0;right:0;z-index:10;padding:6px 10px;\
    font:12px sans-serif;color:#eee;background:rgba(26,26,26,0.85);\
    display:flex;gap:8px;align-items:center";

pub fn build(
    document: &web::Document,
    initial: Rgb,
    queue: Rc<RefCell<CommandQueue>>,
) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;

    let panel = document.create_element("div").map_err(dom::js_err)?;
    panel.set_id(PANEL_ID);
    panel.set_attribute("style", PANEL_STYLE).map_err(dom::js_err)?;

    let label = document.create_element("label").map_err(dom::js_err)?;
    label.set_text_content(Some("materialColor"));
    label
        .set_attribute("for", "material-color")
        .map_err(dom::js_err)?;

    let input = document
        .create_element("input")
        .map_err(dom::js_err)?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    input.set_id("material-color");
    input.set_type("color");
    input.set_value(&initial.to_hex());

    panel.append_child(&label).map_err(dom::js_err)?;
    panel.append_child(&input).map_err(dom::js_err)?;
    body.append_child(&panel).map_err(dom::js_err)?;

    let field = input.clone();
    dom::add_listener(&input, "input", move |_| {
        match Rgb::parse_hex(&field.value()) {
            Ok(color) => queue
                .borrow_mut()
                .push(InputCommand::SetMaterialColor(color)),
            Err(e) => log::warn!("[panel] {e}"),
        }
    });
    Ok(())
}
