//! Platform abstraction layer
//!
//! Tick sources decide when frames happen; the simulation only sees `Frame`s.
//! - `AnimationFrameSource`: browser `requestAnimationFrame` (wasm only)
//! - `FixedStepSource`: a fixed number of frames at a fixed cadence, for
//!   headless runs and tests

/// One frame delivered by a tick source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Frames delivered so far, starting at 0
    pub index: u64,
    /// Wall-clock time in milliseconds
    pub now_ms: f64,
}

/// Something that invokes a callback once per frame
pub trait TickSource {
    /// Start delivering frames. Sources that run forever never return control
    /// to the callback's owner; finite sources return once exhausted.
    fn run<F>(self, on_frame: F)
    where
        F: FnMut(Frame) + 'static;
}

/// Delivers `frames` frames spaced `frame_ms` apart, synchronously
#[derive(Debug, Clone, Copy)]
pub struct FixedStepSource {
    pub frames: u64,
    pub frame_ms: f64,
    pub start_ms: f64,
}

impl FixedStepSource {
    /// 60 Hz frames starting at t = 0
    pub fn new(frames: u64) -> Self {
        Self {
            frames,
            frame_ms: 1000.0 / 60.0,
            start_ms: 0.0,
        }
    }
}

impl TickSource for FixedStepSource {
    fn run<F>(self, mut on_frame: F)
    where
        F: FnMut(Frame) + 'static,
    {
        for index in 0..self.frames {
            on_frame(Frame {
                index,
                now_ms: self.start_ms + index as f64 * self.frame_ms,
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameSource;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{Frame, TickSource};

    /// Ticks on every browser animation frame, forever
    #[derive(Debug, Default)]
    pub struct AnimationFrameSource;

    type FrameCallback = Rc<RefCell<Box<dyn FnMut(Frame)>>>;

    fn request_animation_frame(callback: FrameCallback, index: u64) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; animation loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            {
                let mut on_frame = callback.borrow_mut();
                (*on_frame)(Frame { index, now_ms: time });
            }
            request_animation_frame(callback, index + 1);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    impl TickSource for AnimationFrameSource {
        fn run<F>(self, on_frame: F)
        where
            F: FnMut(Frame) + 'static,
        {
            let callback: FrameCallback = Rc::new(RefCell::new(Box::new(on_frame)));
            request_animation_frame(callback, 0);
        }
    }
}
