use crate::dom;
use scene_core::{CommandQueue, InputCommand};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

fn resize_command(window: &web::Window) -> InputCommand {
    // The pixel ratio cap is applied when the command is handled.
    let vp = dom::current_viewport(window, f64::INFINITY);
    InputCommand::Resize {
        width: vp.width,
        height: vp.height,
        device_pixel_ratio: vp.pixel_ratio,
    }
}

fn scroll_command(window: &web::Window) -> InputCommand {
    InputCommand::Scroll {
        offset_px: window.scroll_y().unwrap_or(0.0),
    }
}

/// Seed the queue with the current size and scroll so the first frame matches
/// the page even before any event fires.
pub fn queue_initial_samples(window: &web::Window, queue: &Rc<RefCell<CommandQueue>>) {
    let mut q = queue.borrow_mut();
    q.push(resize_command(window));
    q.push(scroll_command(window));
}

pub fn wire_window(window: &web::Window, queue: Rc<RefCell<CommandQueue>>) {
    {
        let queue = queue.clone();
        let win = window.clone();
        dom::add_listener(window, "resize", move |_| {
            queue.borrow_mut().push(resize_command(&win));
        });
    }
    {
        let win = window.clone();
        dom::add_listener(window, "scroll", move |_| {
            queue.borrow_mut().push(scroll_command(&win));
        });
    }
}
