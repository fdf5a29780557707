pub mod table;
pub mod views;
pub mod wrap;

use chrono::DateTime;
use crossterm::style::Color;

pub use table::{Cell, Justify, Table};
pub use wrap::wrap;

/// Colour of a rejection reason cell. Cosmetic only.
pub fn reason_color(reason: &str) -> Color {
    match reason {
        "soft-bounce" => Color::Yellow,
        "spam" => Color::Blue,
        _ => Color::Red,
    }
}

/// Unix seconds as `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_colors_are_distinct() {
        let soft = reason_color("soft-bounce");
        let spam = reason_color("spam");
        let hard = reason_color("hard-bounce");
        assert_ne!(spam, soft);
        assert_ne!(spam, hard);
        assert_ne!(soft, hard);
        assert_eq!(reason_color("unsub"), hard);
        assert_eq!(reason_color("custom"), hard);
    }

    #[test]
    fn timestamps_are_utc() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(1718000000), "2024-06-10 06:13:20");
    }
}
