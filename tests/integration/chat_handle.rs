// =====
// TESTS: 4
// =====
//
// Cross-thread append tests.
// Appends arrive through `ChatHandle` and are applied by the UI side only.

use pretty_assertions::assert_eq;

use crate::helpers::test_harness;

#[test]
fn append_from_other_thread_is_queued_until_pump() {
    let mut harness = test_harness();
    let handle = harness.handle();

    std::thread::spawn(move || {
        assert!(handle.append_to_chat("from a worker\n"));
    })
    .join()
    .unwrap();

    assert_eq!(harness.app().transcript, "");
    harness.settle().unwrap();
    assert_eq!(harness.app().transcript, "from a worker\n");
    assert!(harness.text_is_visible("from a worker").unwrap());
}

#[test]
fn appends_keep_send_order() {
    let mut harness = test_harness();
    let handle = harness.handle();
    for n in 0..5 {
        handle.append_to_chat(format!("{n}"));
    }
    harness.settle().unwrap();
    assert_eq!(harness.app().transcript, "01234");
}

#[test]
fn append_after_app_dropped_reports_failure() {
    let harness = test_harness();
    let handle = harness.handle();
    drop(harness);
    assert!(!handle.append_to_chat("nobody listens"));
}

#[tokio::test]
async fn append_and_wait_resolves_after_layout_pass() {
    let mut harness = test_harness();
    let handle = harness.handle();
    let waiter =
        tokio::spawn(async move { handle.append_and_wait_for_layout("async line\n").await });

    let mut epoch = None;
    for _ in 0..50 {
        harness.pump().unwrap();
        tokio::task::yield_now().await;
        if waiter.is_finished() {
            epoch = waiter.await.unwrap();
            break;
        }
    }

    assert_eq!(epoch, Some(1));
    assert_eq!(harness.app().laid_out_epoch, 1);
    harness.settle().unwrap();
    assert!(harness.text_is_visible("async line").unwrap());
}
