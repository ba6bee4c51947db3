// src/report/console.rs
// =============================================================================
// Prints outcomes to the terminal, one line each:
//
//   [UP] https://example.com (Latency: 123ms) SSL: ✓
//   [DOWN] https://broken.test (Latency: -) SSL: ✗
//
// Colors: status is green (UP) or red (DOWN), the SSL mark is yellow.
// The SSL part only appears when the certificate check was requested.
//
// The outcome records know nothing about colors; all presentation lives here.
// =============================================================================

use colored::{Color, Colorize};
use std::io::{self, Write};

use crate::checker::{format_latency, CheckOutcome, Status};

// How to render outcome lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStyle {
    /// Whether to emit ANSI colors
    pub color: bool,
    /// Whether to append the "SSL: ✓/✗" segment
    pub show_ssl: bool,
}

impl ConsoleStyle {
    pub fn new(color: bool, show_ssl: bool) -> Self {
        ConsoleStyle { color, show_ssl }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    // Formats a single outcome as one line (without the trailing newline)
    pub fn render_line(&self, outcome: &CheckOutcome) -> String {
        let status_color = match outcome.status() {
            Status::Up => Color::Green,
            Status::Down => Color::Red,
        };
        let status = self.paint(&format!("[{}]", outcome.status()), status_color);

        let latency = outcome
            .latency()
            .map(format_latency)
            .unwrap_or_else(|| "-".to_string());

        let mut line = format!("{} {} (Latency: {})", status, outcome.url(), latency);

        if self.show_ssl {
            let mark = if outcome.ssl_valid() == Some(true) {
                "✓"
            } else {
                "✗"
            };
            line.push_str(&format!(" SSL: {}", self.paint(mark, Color::Yellow)));
        }

        line
    }
}

// Writes every outcome in the order given (arrival order)
pub fn write_report<W: Write>(
    out: &mut W,
    outcomes: &[CheckOutcome],
    style: ConsoleStyle,
) -> io::Result<()> {
    for outcome in outcomes {
        writeln!(out, "{}", style.render_line(outcome))?;
    }
    Ok(())
}
