// =====
// TESTS: 8
// =====
//
// Scrolling integration tests.
// Writes lines through synthetic key events and checks what ends up on screen.

use pretty_assertions::assert_eq;
use scrollchat::app::long_message;
use scrollchat::visibility::VisibilityError;

use crate::helpers::{HEIGHT, WIDTH, suffix, test_harness};

#[test]
fn each_new_line_scrolls_into_view() {
    let mut harness = test_harness();
    for number in 1..=200 {
        harness.write_line(&long_message(number));
        harness.settle().unwrap();
        assert!(
            harness.text_is_visible(&suffix(number)).unwrap(),
            "Line {number} was not visible"
        );
    }

    assert!(!harness.text_is_visible(&suffix(1)).unwrap());
    assert!(harness.app().transcript.ends_with(&format!("{}\n", long_message(200))));
}

#[test]
fn first_line_scrolls_out_of_view() {
    let mut harness = test_harness();
    harness.write_line(&long_message(1));
    harness.settle().unwrap();
    assert!(harness.text_is_visible(&suffix(1)).unwrap());

    for number in 2..=10 {
        harness.write_line(&long_message(number));
    }
    harness.settle().unwrap();
    assert!(!harness.text_is_visible(&suffix(1)).unwrap());
    assert!(harness.text_is_visible(&suffix(10)).unwrap());
}

#[test]
fn resize_keeps_last_line_visible() {
    let mut harness = test_harness();
    for number in 1..=30 {
        harness.write_line(&long_message(number));
    }
    harness.settle().unwrap();
    assert!(harness.text_is_visible(&suffix(30)).unwrap());

    // Narrow and tall, like turning a phone upright
    harness.resize(24, 30).unwrap();
    harness.settle().unwrap();
    assert!(harness.text_is_visible(&suffix(30)).unwrap());

    // Wide and short
    harness.resize(100, 8).unwrap();
    harness.settle().unwrap();
    assert!(harness.text_is_visible(&suffix(30)).unwrap());
}

#[test]
fn scrolling_up_hides_last_line() {
    let mut harness = test_harness();
    for number in 1..=20 {
        harness.write_line(&long_message(number));
    }
    harness.settle().unwrap();

    harness.send_key(crossterm::event::KeyCode::PageUp);
    harness.send_key(crossterm::event::KeyCode::PageUp);
    harness.settle().unwrap();
    assert!(!harness.text_is_visible(&suffix(20)).unwrap());

    // A new line brings the view back down
    harness.write_line("back to the bottom");
    harness.settle().unwrap();
    assert!(harness.text_is_visible("back to the bottom").unwrap());
}

#[test]
fn empty_line_submits_terminator_only() {
    let mut harness = test_harness();
    harness.write_line("");
    harness.write_line("after");
    harness.settle().unwrap();
    assert_eq!(harness.app().transcript, "\nafter\n");
    assert!(harness.text_is_visible("after").unwrap());
}

#[test]
fn unknown_text_is_an_error() {
    let mut harness = test_harness();
    harness.write_line("hello");
    harness.settle().unwrap();
    assert_eq!(
        harness.text_is_visible("goodbye"),
        Err(VisibilityError::NotFound { text: "goodbye".to_owned() })
    );
}

#[test]
fn repeated_text_checks_last_occurrence() {
    let mut harness = test_harness();
    harness.write_line("repeat me");
    for number in 1..=10 {
        harness.write_line(&long_message(number));
    }
    harness.write_line("repeat me");
    harness.settle().unwrap();
    assert!(harness.text_is_visible("repeat me").unwrap());
}

#[test]
fn screen_shows_bottom_rows() {
    let mut harness = test_harness();
    for number in 1..=15 {
        harness.write_line(&long_message(number));
    }
    harness.settle().unwrap();

    let screen = harness.screen_lines();
    assert_eq!(screen.len(), usize::from(HEIGHT));
    assert_eq!(screen[0].chars().count(), usize::from(WIDTH));
    let body = screen[..usize::from(HEIGHT) - 3].concat();
    assert!(body.contains("15.9!"));
    assert!(screen[usize::from(HEIGHT) - 1].contains("[bottom]"));
}
