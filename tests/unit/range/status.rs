use super::*;

#[test]
fn unknown_registrations_start_initial() {
    let s = WorkingRangeStatusHandler::new();
    assert_eq!(s.status("r", "k"), WorkingRangeStatus::Initial);
    assert!(!s.is_in_range("r", "k"));
}

#[test]
fn status_transitions_are_tracked_per_name_and_key() {
    let s = WorkingRangeStatusHandler::new();
    s.set_entered_range_status("r", "k");
    assert!(s.is_in_range("r", "k"));
    assert!(!s.is_in_range("other", "k"));
    s.set_exited_range_status("r", "k");
    assert_eq!(s.status("r", "k"), WorkingRangeStatus::Exited);
}

#[test]
fn clear_state_for_drops_only_that_component() {
    let s = WorkingRangeStatusHandler::new();
    s.set_entered_range_status("a", "k1");
    s.set_entered_range_status("b", "k1");
    s.set_entered_range_status("a", "k2");
    s.clear_state_for("k1");
    assert_eq!(s.status("a", "k1"), WorkingRangeStatus::Initial);
    assert_eq!(s.status("b", "k1"), WorkingRangeStatus::Initial);
    assert!(s.is_in_range("a", "k2"));
    s.clear();
    assert!(!s.is_in_range("a", "k2"));
}

#[test]
fn concurrent_transactions_never_double_enter() {
    let s = WorkingRangeStatusHandler::new();
    let fired = std::sync::atomic::AtomicUsize::new(0);
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                s.transact(|t| {
                    if t.get("r", "k") != WorkingRangeStatus::Entered {
                        fired.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                        t.set("r", "k", WorkingRangeStatus::Entered);
                    }
                });
            });
        }
    });
    assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 1);
}
