use scrollchat::harness::Harness;

/// Screen size used by most tests: narrow enough that every demo message
/// wraps over several rows, short enough that the transcript overflows fast.
pub const WIDTH: u16 = 40;
pub const HEIGHT: u16 = 12;

/// Headless chat screen, drawn once, with an empty transcript.
#[allow(clippy::expect_used)]
pub fn test_harness() -> Harness {
    Harness::new(WIDTH, HEIGHT).expect("test backend")
}

/// The unique tail of demo message `number`.
pub fn suffix(number: usize) -> String {
    format!("This is message number {number}.9!")
}
