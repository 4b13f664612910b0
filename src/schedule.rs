//! Scheduling primitives
//!
//! - `DeferredQueue`: timer-style actions that fire once their due time passes
//! - `AnimationLoop` (wasm only): cancellable `requestAnimationFrame` loop

/// Whether a repeating task wants another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Pending deferred actions, fired in due-time order
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    pending: Vec<(f64, T)>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to become due at `due_ms`
    pub fn schedule(&mut self, due_ms: f64, action: T) {
        // Keep sorted by due time; equal times stay in scheduling order
        let idx = self.pending.partition_point(|(due, _)| *due <= due_ms);
        self.pending.insert(idx, (due_ms, action));
    }

    /// Remove and return every action due at or before `now_ms`
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<T> {
        let split = self.pending.partition_point(|(due, _)| *due <= now_ms);
        self.pending.drain(..split).map(|(_, action)| action).collect()
    }

    /// Earliest due time, if anything is pending
    pub fn next_due(&self) -> Option<f64> {
        self.pending.first().map(|(due, _)| *due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything pending
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AnimationLoop;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::LoopControl;

    type FrameCallback = Closure<dyn FnMut(f64)>;

    /// `requestAnimationFrame` loop that can be cancelled from outside
    ///
    /// The callback receives the frame timestamp and returns whether to keep
    /// going. `cancel` deregisters the pending frame so no stale tick runs.
    #[derive(Clone, Default)]
    pub struct AnimationLoop {
        request_id: Rc<Cell<Option<i32>>>,
        closure: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl AnimationLoop {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_running(&self) -> bool {
            self.request_id.get().is_some()
        }

        /// Start the loop, replacing any previous one
        pub fn start(&self, mut on_frame: impl FnMut(f64) -> LoopControl + 'static) {
            self.cancel();

            let request_id = self.request_id.clone();
            let closure_slot = self.closure.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                request_id.set(None);
                if on_frame(time) == LoopControl::Continue {
                    if let Some(cb) = closure_slot.borrow().as_ref() {
                        request_id.set(request_frame(cb));
                    }
                }
            });

            self.request_id.set(request_frame(&closure));
            *self.closure.borrow_mut() = Some(closure);
        }

        /// Deregister the pending frame, if any
        pub fn cancel(&self) {
            if let Some(id) = self.request_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    fn request_frame(cb: &FrameCallback) -> Option<i32> {
        let window = web_sys::window()?;
        window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_due_respects_time() {
        let mut q = DeferredQueue::new();
        q.schedule(3000.0, "a");
        q.schedule(1000.0, "b");
        assert_eq!(q.next_due(), Some(1000.0));

        assert!(q.drain_due(999.0).is_empty());
        assert_eq!(q.drain_due(1000.0), vec!["b"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(10_000.0), vec!["a"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_equal_due_times_keep_order() {
        let mut q = DeferredQueue::new();
        q.schedule(5.0, 1);
        q.schedule(5.0, 2);
        q.schedule(1.0, 0);
        assert_eq!(q.drain_due(5.0), vec![0, 1, 2]);
    }

    #[test]
    fn test_clear() {
        let mut q = DeferredQueue::new();
        q.schedule(1.0, ());
        q.clear();
        assert!(q.drain_due(100.0).is_empty());
    }
}
