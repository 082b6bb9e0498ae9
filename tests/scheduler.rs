use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use synapsis_lib::scheduler::BatchScheduler;

fn log_sink() -> Rc<RefCell<Vec<&'static str>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn last_write_wins_per_key() {
    let mut scheduler = BatchScheduler::new(Duration::from_millis(50));
    let log = log_sink();

    let first = Rc::clone(&log);
    scheduler.schedule("panel", move || {
        first.borrow_mut().push("first");
        Ok(())
    });
    let second = Rc::clone(&log);
    scheduler.schedule("panel", move || {
        second.borrow_mut().push("second");
        Ok(())
    });
    assert_eq!(scheduler.pending_count(), 1);

    scheduler.frame(Instant::now());
    assert_eq!(*log.borrow(), vec!["second"]);
}

#[test]
fn flushes_are_gated_by_the_update_interval() {
    let mut scheduler = BatchScheduler::new(Duration::from_millis(50));
    let log = log_sink();
    let t0 = Instant::now();

    let sink = Rc::clone(&log);
    scheduler.schedule("panel", move || {
        sink.borrow_mut().push("one");
        Ok(())
    });
    // The first flush is immediate.
    scheduler.frame(t0);
    assert_eq!(log.borrow().len(), 1);

    let sink = Rc::clone(&log);
    scheduler.schedule("panel", move || {
        sink.borrow_mut().push("two");
        Ok(())
    });
    // Not enough time has passed; the callback stays pending.
    scheduler.frame(t0 + Duration::from_millis(10));
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(scheduler.pending_count(), 1);

    scheduler.frame(t0 + Duration::from_millis(60));
    assert_eq!(*log.borrow(), vec!["one", "two"]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn a_failing_callback_does_not_abort_the_batch() {
    let mut scheduler = BatchScheduler::new(Duration::from_millis(50));
    let log = log_sink();

    scheduler.schedule("broken", || anyhow::bail!("panel gone"));
    let sink = Rc::clone(&log);
    scheduler.schedule("healthy", move || {
        sink.borrow_mut().push("ran");
        Ok(())
    });

    scheduler.frame(Instant::now());
    assert_eq!(*log.borrow(), vec!["ran"]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn stop_discards_pending_work() {
    let mut scheduler = BatchScheduler::new(Duration::from_millis(50));
    let log = log_sink();

    let sink = Rc::clone(&log);
    scheduler.schedule("panel", move || {
        sink.borrow_mut().push("never");
        Ok(())
    });
    scheduler.stop();
    assert!(!scheduler.frame(Instant::now()));
    assert!(log.borrow().is_empty());
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn frame_reports_whether_to_keep_rearming() {
    let mut scheduler = BatchScheduler::new(Duration::from_millis(50));
    assert!(!scheduler.frame(Instant::now()));

    scheduler.schedule("panel", || Ok(()));
    assert!(scheduler.frame(Instant::now()));
    assert!(scheduler.is_running());

    scheduler.stop();
    assert!(!scheduler.frame(Instant::now()));
}
