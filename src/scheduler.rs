//! Cancellable timer scheduling for the draw session.
//!
//! Every scheduled callback is held as a `Timeout` handle in a disposal map;
//! dropping a handle clears its underlying timeout. `clear()` therefore
//! guarantees that nothing fires after teardown or reset.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct TimerPool {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    pending: HashMap<u64, Timeout>,
}

impl TimerPool {
    /// Run `callback` after `delay_ms`, keeping the handle cancellable until
    /// it fires. Fired entries remove themselves from the pool.
    pub fn schedule(&self, delay_ms: u32, callback: impl FnOnce() + 'static) {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            inner.next_id
        };
        let pool = self.clone();
        let handle = Timeout::new(delay_ms, move || {
            // Drop our own handle first so the pool never holds spent timers.
            pool.inner.borrow_mut().pending.remove(&id);
            callback();
        });
        self.inner.borrow_mut().pending.insert(id, handle);
    }

    /// Cancel everything still pending.
    pub fn clear(&self) {
        self.inner.borrow_mut().pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}
