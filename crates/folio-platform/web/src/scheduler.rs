use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use folio_core::{Duration, Instant, Scheduler, TaskId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

struct Timer {
    handle: i32,
    repeating: bool,
    closure: Closure<dyn FnMut()>,
}

struct Timers {
    window: Window,
    next_id: Cell<u64>,
    active: RefCell<HashMap<TaskId, Timer>>,
    // Closures of finished or cancelled timers. A closure may be retired from
    // inside its own callback, so it is only freed at the start of a later
    // timer callback, when it can no longer be on the stack.
    retired: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl Timers {
    fn allocate_id(&self) -> TaskId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        TaskId::new(id)
    }

    fn retire(&self, id: TaskId) -> Option<Timer> {
        let timer = self.active.borrow_mut().remove(&id)?;
        Some(timer)
    }

    fn sweep(&self) {
        let retired = std::mem::take(&mut *self.retired.borrow_mut());
        drop(retired);
    }

    fn bury(&self, timer: Timer) {
        self.retired.borrow_mut().push(timer.closure);
    }
}

/// [`Scheduler`] backed by the window's timers.
///
/// Cloning shares the same timer table.
#[derive(Clone)]
pub struct WindowScheduler {
    timers: Rc<Timers>,
}

impl WindowScheduler {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window exists")?;
        Ok(Self::with_window(window))
    }

    pub fn with_window(window: Window) -> Self {
        Self {
            timers: Rc::new(Timers {
                window,
                next_id: Cell::new(1),
                active: RefCell::new(HashMap::new()),
                retired: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.timers.active.borrow().len()
    }

    fn start(&self, id: TaskId, delay: Duration, repeating: bool, closure: Closure<dyn FnMut()>) -> Option<TaskId> {
        let timeout = delay.as_millis().min(i32::MAX as u128) as i32;
        let function = closure.as_ref().unchecked_ref();
        let started = if repeating {
            self.timers
                .window
                .set_interval_with_callback_and_timeout_and_arguments_0(function, timeout)
        } else {
            self.timers
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(function, timeout)
        };
        match started {
            Ok(handle) => {
                self.timers.active.borrow_mut().insert(
                    id,
                    Timer {
                        handle,
                        repeating,
                        closure,
                    },
                );
                Some(id)
            }
            Err(err) => {
                log::error!("window refused {id}: {err:?}");
                None
            }
        }
    }
}

impl Scheduler for WindowScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<TaskId> {
        let id = self.timers.allocate_id();
        let timers: Weak<Timers> = Rc::downgrade(&self.timers);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(timers) = timers.upgrade() {
                timers.sweep();
                if let Some(timer) = timers.retire(id) {
                    timers.bury(timer);
                }
            }
            if let Some(callback) = callback.take() {
                callback();
            }
        }) as Box<dyn FnMut()>);
        self.start(id, delay, false, closure)
    }

    fn schedule_repeating(&self, period: Duration, mut callback: Box<dyn FnMut()>) -> Option<TaskId> {
        let id = self.timers.allocate_id();
        let timers: Weak<Timers> = Rc::downgrade(&self.timers);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(timers) = timers.upgrade() {
                timers.sweep();
            }
            callback();
        }) as Box<dyn FnMut()>);
        self.start(id, period, true, closure)
    }

    fn cancel(&self, id: TaskId) {
        let Some(timer) = self.timers.retire(id) else {
            return;
        };
        if timer.repeating {
            self.timers.window.clear_interval_with_handle(timer.handle);
        } else {
            self.timers.window.clear_timeout_with_handle(timer.handle);
        }
        log::trace!("cancelled {id}");
        self.timers.bury(timer);
    }

    fn is_pending(&self, id: TaskId) -> bool {
        self.timers.active.borrow().contains_key(&id)
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        for (_, timer) in self.active.get_mut().drain() {
            if timer.repeating {
                self.window.clear_interval_with_handle(timer.handle);
            } else {
                self.window.clear_timeout_with_handle(timer.handle);
            }
        }
    }
}
