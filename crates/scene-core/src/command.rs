//! Input commands produced by page listeners and drained once per frame.

use crate::color::Rgb;
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq)]
pub enum InputCommand {
    Resize {
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    },
    Scroll {
        offset_px: f64,
    },
    PointerMove {
        client_x: f64,
        client_y: f64,
    },
    SetMaterialColor(Rgb),
}

/// FIFO of pending commands. Producers push from event handlers; the frame
/// tick is the only consumer.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<InputCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: InputCommand) {
        self.pending.push_back(cmd);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and yield all queued commands in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputCommand> + '_ {
        self.pending.drain(..)
    }
}
