//! Character-by-character reveal for the final answer.

use std::io::Write;
use std::time::Duration;

/// Print `text` one character at a time at the given advisory rate.
///
/// A rate of zero (or below) degenerates to a plain print. The delay is
/// per character, so the total reveal time scales with the text length.
pub async fn typeout(text: &str, chars_per_sec: f64) {
    if chars_per_sec <= 0.0 {
        println!("{text}");
        return;
    }

    let delay = Duration::from_secs_f64(1.0 / chars_per_sec);
    let mut stdout = std::io::stdout();
    for ch in text.chars() {
        print!("{ch}");
        let _ = stdout.flush();
        tokio::time::sleep(delay).await;
    }
    println!();
}
