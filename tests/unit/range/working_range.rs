use std::sync::Mutex;

use super::*;

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(String, String, &'static str)>>,
}

impl Recorder {
    fn take(&self) -> Vec<(String, String, &'static str)> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl WorkingRangeListener for Recorder {
    fn on_entered_range(&self, name: &str, component: &ComponentInfo) {
        self.events
            .lock()
            .unwrap()
            .push((name.to_string(), component.global_key.clone(), "enter"));
    }

    fn on_exited_range(&self, name: &str, component: &ComponentInfo) {
        self.events
            .lock()
            .unwrap()
            .push((name.to_string(), component.global_key.clone(), "exit"));
    }
}

fn container() -> WorkingRangeContainer {
    let mut c = WorkingRangeContainer::new();
    c.register(
        "prefetch",
        WorkingRangeSpec::IndexWindow { first: 2, last: 5 },
        ComponentInfo::new(1, "Feed", "root,feed"),
    );
    c
}

#[test]
fn window_moves_fire_exactly_one_enter_then_one_exit() {
    let c = container();
    let status = WorkingRangeStatusHandler::new();
    let rec = Recorder::default();

    let r = c.check_working_range_and_dispatch(0, &VisibleWindow::new(0, 1), &status, &rec);
    assert_eq!(r, DispatchReport::default());

    let r = c.check_working_range_and_dispatch(0, &VisibleWindow::new(2, 5), &status, &rec);
    assert_eq!(r.entered, 1);
    // Still inside: no duplicate enter.
    let r = c.check_working_range_and_dispatch(0, &VisibleWindow::new(3, 4), &status, &rec);
    assert_eq!(r, DispatchReport::default());

    let r = c.check_working_range_and_dispatch(0, &VisibleWindow::new(6, 9), &status, &rec);
    assert_eq!(r.exited, 1);
    assert_eq!(r.entered, 0);
    let r = c.check_working_range_and_dispatch(0, &VisibleWindow::new(7, 10), &status, &rec);
    assert_eq!(r, DispatchReport::default());

    let r = c.dispatch_on_exit_if_needed(&status, &rec);
    assert_eq!(r, DispatchReport::default());

    assert_eq!(
        rec.take(),
        vec![
            ("prefetch".to_string(), "root,feed".to_string(), "enter"),
            ("prefetch".to_string(), "root,feed".to_string(), "exit"),
        ]
    );
}

#[test]
fn teardown_exits_everything_still_entered_once() {
    let c = container();
    let status = WorkingRangeStatusHandler::new();
    let rec = Recorder::default();
    c.check_working_range_and_dispatch(0, &VisibleWindow::new(4, 8), &status, &rec);
    rec.take();

    assert_eq!(c.dispatch_on_exit_if_needed(&status, &rec).exited, 1);
    assert_eq!(c.dispatch_on_exit_if_needed(&status, &rec).exited, 0);
    assert_eq!(rec.take().len(), 1);
    assert!(!status.is_in_range("prefetch", "root,feed"));
}

#[test]
fn status_is_shared_between_containers_of_the_same_tree() {
    let first = container();
    let second = container();
    let status = WorkingRangeStatusHandler::new();
    let rec = Recorder::default();
    first.check_working_range_and_dispatch(0, &VisibleWindow::new(2, 3), &status, &rec);
    let r = second.check_working_range_and_dispatch(0, &VisibleWindow::new(2, 3), &status, &rec);
    assert_eq!(r.entered, 0);
}

/// Listener that reads and clears the shared status from inside its callbacks.
struct StatusReader<'a> {
    status: &'a WorkingRangeStatusHandler,
    seen: Mutex<Vec<bool>>,
}

impl WorkingRangeListener for StatusReader<'_> {
    fn on_entered_range(&self, name: &str, component: &ComponentInfo) {
        let in_range = self.status.is_in_range(name, &component.global_key);
        self.seen.lock().unwrap().push(in_range);
    }

    fn on_exited_range(&self, name: &str, component: &ComponentInfo) {
        let in_range = self.status.is_in_range(name, &component.global_key);
        self.seen.lock().unwrap().push(in_range);
        self.status.clear_state_for(&component.global_key);
    }
}

#[test]
fn listener_may_call_back_into_the_status_store() {
    let c = container();
    let status = WorkingRangeStatusHandler::new();
    let reader = StatusReader {
        status: &status,
        seen: Mutex::new(Vec::new()),
    };

    std::thread::scope(|s| {
        let worker = s.spawn(|| {
            let entered =
                c.check_working_range_and_dispatch(0, &VisibleWindow::new(2, 3), &status, &reader);
            let exited = c.dispatch_on_exit_if_needed(&status, &reader);
            (entered, exited)
        });
        let (entered, exited) = worker.join().unwrap();
        assert_eq!(entered.entered, 1);
        assert_eq!(exited.exited, 1);
    });

    // Status is marked before the callback runs.
    assert_eq!(*reader.seen.lock().unwrap(), vec![true, false]);
    assert_eq!(status.status("prefetch", "root,feed"), WorkingRangeStatus::Initial);
}

#[test]
fn bounded_range_widens_the_window_by_offset() {
    let r = WorkingRangeSpec::Bounded { offset: 2 };
    let w = VisibleWindow::new(10, 12);
    assert!(r.should_enter_range(8, &w));
    assert!(r.should_enter_range(14, &w));
    assert!(r.should_exit_range(7, &w));
    assert!(r.should_exit_range(15, &w));
    assert!(r.is_in_range(0, &VisibleWindow::new(1, 1)));
}

#[test]
fn registrations_group_by_name_and_predicate() {
    let mut c = container();
    c.register(
        "prefetch",
        WorkingRangeSpec::IndexWindow { first: 2, last: 5 },
        ComponentInfo::new(2, "Feed", "root,feed2"),
    );
    c.register(
        "prefetch",
        WorkingRangeSpec::Bounded { offset: 1 },
        ComponentInfo::new(3, "Feed", "root,feed3"),
    );
    assert_eq!(c.len(), 3);
    assert_eq!(c.tuples.len(), 2);
    let keys = c
        .registrations()
        .map(|(_, _, comp)| comp.global_key.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["root,feed", "root,feed2", "root,feed3"]);
}

#[test]
fn spec_json_is_internally_tagged() {
    let r: WorkingRangeSpec =
        serde_json::from_value(serde_json::json!({ "kind": "bounded", "offset": 3 })).unwrap();
    assert_eq!(r, WorkingRangeSpec::Bounded { offset: 3 });
}
