use crate::dom;
use scene_core::{CommandQueue, InputCommand};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Forward pointer movement anywhere in the window as client coordinates.
pub fn wire_pointer(window: &web::Window, queue: Rc<RefCell<CommandQueue>>) {
    dom::add_listener(window, "pointermove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        queue.borrow_mut().push(InputCommand::PointerMove {
            client_x: ev.client_x() as f64,
            client_y: ev.client_y() as f64,
        });
    });
}
