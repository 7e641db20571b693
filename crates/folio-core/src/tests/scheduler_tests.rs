use super::*;

use std::cell::Cell;

fn manual() -> (Rc<ManualScheduler>, Rc<dyn Scheduler>) {
    let manual = Rc::new(ManualScheduler::new());
    let scheduler: Rc<dyn Scheduler> = manual.clone();
    (manual, scheduler)
}

#[test]
fn once_fires_after_delay() {
    let (manual, scheduler) = manual();
    let fired = Rc::new(Cell::new(0));

    let counter = Rc::clone(&fired);
    let _handle = TaskHandle::once(&scheduler, Duration::from_millis(150), move || {
        counter.set(counter.get() + 1);
    });

    manual.advance_millis(149);
    assert_eq!(fired.get(), 0);
    manual.advance_millis(1);
    assert_eq!(fired.get(), 1);
    manual.advance_millis(1_000);
    assert_eq!(fired.get(), 1);
    assert_eq!(manual.pending_count(), 0);
}

#[test]
fn repeating_fires_each_period() {
    let (manual, scheduler) = manual();
    let fired = Rc::new(Cell::new(0));

    let counter = Rc::clone(&fired);
    let _handle = TaskHandle::repeating(&scheduler, Duration::from_millis(100), move || {
        counter.set(counter.get() + 1);
    });

    assert_eq!(manual.advance_millis(1_000), 10);
    assert_eq!(fired.get(), 10);
}

#[test]
fn dropping_handle_cancels_task() {
    let (manual, scheduler) = manual();
    let fired = Rc::new(Cell::new(false));

    let flag = Rc::clone(&fired);
    let handle = TaskHandle::once(&scheduler, Duration::from_millis(10), move || flag.set(true));
    assert!(handle.is_pending());
    drop(handle);

    manual.advance_millis(50);
    assert!(!fired.get());
    assert_eq!(manual.pending_count(), 0);
}

#[test]
fn explicit_cancel_stops_repeating_task() {
    let (manual, scheduler) = manual();
    let fired = Rc::new(Cell::new(0));

    let counter = Rc::clone(&fired);
    let handle = TaskHandle::repeating(&scheduler, Duration::from_millis(100), move || {
        counter.set(counter.get() + 1);
    });
    manual.advance_millis(250);
    handle.cancel();
    manual.advance_millis(1_000);

    assert_eq!(fired.get(), 2);
}

#[test]
fn now_tracks_due_time_inside_callbacks() {
    let (manual, scheduler) = manual();
    let start = scheduler.now();
    let seen = Rc::new(Cell::new(None));

    let sink = Rc::clone(&seen);
    let clock = Rc::clone(&scheduler);
    let _handle = TaskHandle::once(&scheduler, Duration::from_millis(40), move || {
        sink.set(Some(clock.now()));
    });
    manual.advance_millis(100);

    assert_eq!(seen.get(), Some(start + Duration::from_millis(40)));
    assert_eq!(scheduler.now(), start + Duration::from_millis(100));
}

#[test]
fn callbacks_may_schedule_more_work() {
    let (manual, scheduler) = manual();
    let fired = Rc::new(Cell::new(0));
    let follow_up: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));

    let counter = Rc::clone(&fired);
    let slot = Rc::clone(&follow_up);
    let inner = Rc::clone(&scheduler);
    let _handle = TaskHandle::once(&scheduler, Duration::from_millis(10), move || {
        counter.set(counter.get() + 1);
        let counter = Rc::clone(&counter);
        let next = TaskHandle::once(&inner, Duration::from_millis(10), move || {
            counter.set(counter.get() + 1);
        });
        *slot.borrow_mut() = Some(next);
    });

    manual.advance_millis(25);
    assert_eq!(fired.get(), 2);
}

#[test]
fn tasks_due_together_fire_in_scheduling_order() {
    let (manual, scheduler) = manual();
    let order = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&order);
    let second = Rc::clone(&order);
    let _a = TaskHandle::once(&scheduler, Duration::from_millis(5), move || {
        first.borrow_mut().push("a")
    });
    let _b = TaskHandle::once(&scheduler, Duration::from_millis(5), move || {
        second.borrow_mut().push("b")
    });
    manual.advance_millis(5);

    assert_eq!(order.borrow().as_slice(), &["a", "b"]);
}
