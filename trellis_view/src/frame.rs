// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation-frame scheduling.
//!
//! The host drives time: it calls [`FrameScheduler::run_frame`] once per frame. Callbacks
//! queued while a frame runs are held for the next one, so "wait two frames" is expressed by
//! queueing from inside a callback.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use trellis_tree::Tree;

/// A callback run on a future frame.
pub type FrameCallback = Box<dyn FnOnce(&mut Tree)>;

#[derive(Default)]
struct Queue {
    pending: RefCell<VecDeque<FrameCallback>>,
    frames: Cell<u64>,
}

/// Shared queue of frame callbacks. Clones share the queue.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    queue: Rc<Queue>,
}

impl core::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.pending())
            .field("frames", &self.queue.frames.get())
            .finish()
    }
}

impl FrameScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` for the next frame.
    pub fn request(&self, callback: impl FnOnce(&mut Tree) + 'static) {
        self.queue.pending.borrow_mut().push_back(Box::new(callback));
    }

    /// Number of callbacks waiting for a frame.
    pub fn pending(&self) -> usize {
        self.queue.pending.borrow().len()
    }

    /// Returns true if nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Number of frames run so far.
    pub fn frames_run(&self) -> u64 {
        self.queue.frames.get()
    }

    /// Run one frame: every callback queued before this call, in order.
    ///
    /// Returns how many callbacks ran.
    pub fn run_frame(&self, tree: &mut Tree) -> usize {
        let batch = core::mem::take(&mut *self.queue.pending.borrow_mut());
        self.queue.frames.set(self.queue.frames.get() + 1);
        let count = batch.len();
        for callback in batch {
            callback(tree);
        }
        count
    }

    /// Run frames until the queue is empty or `max_frames` frames have run.
    ///
    /// Returns the number of frames run.
    pub fn run_until_idle(&self, tree: &mut Tree, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && !self.is_idle() {
            self.run_frame(tree);
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn callbacks_queued_during_a_frame_wait_for_the_next() {
        let frames = FrameScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Tree::new();

        let (f, l) = (frames.clone(), log.clone());
        frames.request(move |_| {
            l.borrow_mut().push(1);
            let l2 = l.clone();
            f.request(move |_| l2.borrow_mut().push(2));
        });

        assert_eq!(frames.run_frame(&mut tree), 1);
        assert_eq!(*log.borrow(), [1]);
        assert_eq!(frames.pending(), 1);
        assert_eq!(frames.run_frame(&mut tree), 1);
        assert_eq!(*log.borrow(), [1, 2]);
        assert!(frames.is_idle());
        assert_eq!(frames.frames_run(), 2);
    }

    #[test]
    fn run_until_idle_is_bounded() {
        let frames = FrameScheduler::new();
        let mut tree = Tree::new();
        fn again(f: FrameScheduler) -> impl FnOnce(&mut Tree) {
            move |_| {
                let next = f.clone();
                f.request(again(next));
            }
        }
        frames.request(again(frames.clone()));
        assert_eq!(frames.run_until_idle(&mut tree, 5), 5);
        assert_eq!(frames.pending(), 1);
    }
}
