#![cfg(target_arch = "wasm32")]
use instant::Instant;
use scene_core::{CommandQueue, FrameClock, SceneState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod panel;
mod render;
mod texture;

thread_local! {
    static FRAME_LOOP: RefCell<Option<frame::FrameLoop>> = const { RefCell::new(None) };
}

/// Pause the scene loop (e.g. while the hosting view is hidden).
#[wasm_bindgen]
pub fn stop_scene() {
    FRAME_LOOP.with(|l| {
        if let Some(l) = l.borrow().as_ref() {
            l.stop();
        }
    });
}

/// Resume the scene loop after [`stop_scene`].
#[wasm_bindgen]
pub fn start_scene() {
    FRAME_LOOP.with(|l| {
        if let Some(l) = l.borrow().as_ref() {
            l.start();
        }
    });
}

fn wire_page_lifecycle(window: &web::Window, frame_loop: &frame::FrameLoop) {
    let on_hide = frame_loop.clone();
    dom::add_listener(window, "pagehide", move |_| on_hide.stop());
    let on_show = frame_loop.clone();
    dom::add_listener(window, "pageshow", move |_| on_show.start());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scroll-scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::query_canvas(&document)?;

    let config = dom::read_scene_config(&document);
    let viewport = dom::current_viewport(&window, config.max_pixel_ratio);
    let state = SceneState::new(&config, viewport)?;

    // Listeners only enqueue; the frame tick is the single consumer.
    let queue = Rc::new(RefCell::new(CommandQueue::new()));
    if let Err(e) = panel::build(&document, state.scene.material.color, queue.clone()) {
        log::warn!("color panel unavailable: {:?}", e);
    }
    events::wire_window(&window, queue.clone());
    events::wire_pointer(&window, queue.clone());
    events::queue_initial_samples(&window, &queue);

    let (w, h) = viewport.backing_size();
    dom::set_canvas_backing_size(&canvas, w, h);
    let mut gpu = match render::GpuState::new(&canvas, &state.scene, w, h).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };
    if let Some(g) = &mut gpu {
        match texture::fetch_image_bitmap(&config.gradient_url).await {
            Ok(bitmap) => g.set_gradient_bitmap(&bitmap),
            Err(e) => log::warn!(
                "gradient {} unavailable, using {}-step ramp: {:?}",
                config.gradient_url,
                config.gradient_steps,
                e
            ),
        }
    }

    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        queue,
        gpu,
        canvas,
        clock: FrameClock::new(),
        origin: Instant::now(),
    }));
    let frame_loop = frame::FrameLoop::new(ctx);
    wire_page_lifecycle(&window, &frame_loop);
    frame_loop.start();
    FRAME_LOOP.with(|l| *l.borrow_mut() = Some(frame_loop));
    Ok(())
}
