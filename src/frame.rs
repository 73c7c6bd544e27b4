use crate::dom;
use crate::render;
use instant::Instant;
use scene_core::{CommandQueue, FrameClock, SceneState};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub state: SceneState,
    pub queue: Rc<RefCell<CommandQueue>>,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub clock: FrameClock,
    pub origin: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let dt_sec = self.clock.tick(self.origin.elapsed().as_secs_f64());
        let report = {
            let mut queue = self.queue.borrow_mut();
            self.state.update(&mut queue, dt_sec)
        };
        for change in &report.section_changes {
            log::debug!("[frame] section {} -> {}", change.from, change.to);
        }

        if let Some((w, h)) = report.resized_to {
            dom::set_canvas_backing_size(&self.canvas, w, h);
            if let Some(g) = &mut self.gpu {
                g.resize(w, h);
            }
        }

        let Some(g) = &mut self.gpu else {
            return;
        };
        if report.color_changed {
            g.write_materials(&self.state.scene);
        }
        match g.render(&self.state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

struct LoopInner {
    ctx: Rc<RefCell<FrameContext>>,
    running: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopInner {
    fn schedule(&self) {
        let Some(window) = web::window() else {
            return;
        };
        if let Some(cb) = self.callback.borrow().as_ref() {
            match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.raf_id.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }

    fn cancel_pending(&self) {
        if let (Some(id), Some(window)) = (self.raf_id.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
    }
}

impl Drop for LoopInner {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// requestAnimationFrame loop with an explicit start/stop lifecycle.
///
/// Stopping cancels the pending frame; starting again resets the frame clock
/// so the first frame after a pause sees a zero delta.
#[derive(Clone)]
pub struct FrameLoop {
    inner: Rc<LoopInner>,
}

impl FrameLoop {
    pub fn new(ctx: Rc<RefCell<FrameContext>>) -> Self {
        let inner = Rc::new(LoopInner {
            ctx,
            running: Cell::new(false),
            raf_id: Cell::new(None),
            callback: RefCell::new(None),
        });
        let weak: Weak<LoopInner> = Rc::downgrade(&inner);
        *inner.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.raf_id.set(None);
            if !inner.running.get() {
                return;
            }
            inner.ctx.borrow_mut().frame();
            if inner.running.get() {
                inner.schedule();
            }
        }) as Box<dyn FnMut()>));
        Self { inner }
    }

    pub fn start(&self) {
        if self.inner.running.replace(true) {
            return;
        }
        self.inner.ctx.borrow_mut().clock.reset();
        self.inner.schedule();
        log::info!("[loop] started");
    }

    pub fn stop(&self) {
        if !self.inner.running.replace(false) {
            return;
        }
        self.inner.cancel_pending();
        log::info!("[loop] stopped");
    }
}
