//! Branded caption composition

use std::sync::Arc;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::application::texts::{DISCLAIMER, PRODUCT_LABEL};
use crate::domain::traits::Clock;

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Wraps broadcast lines in the branded header and timestamped footer
pub struct CaptionComposer {
    display_name: String,
    timezone: Tz,
    timezone_name: String,
    clock: Arc<dyn Clock>,
}

impl CaptionComposer {
    /// `timezone_name` is printed as given; `timezone` is used for the conversion
    pub fn new(
        display_name: impl Into<String>,
        timezone: Tz,
        timezone_name: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            timezone,
            timezone_name: timezone_name.into(),
            clock,
        }
    }

    /// Compose using the clock reading taken now
    pub fn compose<S: AsRef<str>>(&self, lines: &[S]) -> String {
        self.compose_at(lines, self.clock.now())
    }

    pub fn compose_at<S: AsRef<str>>(&self, lines: &[S], now: DateTime<Utc>) -> String {
        let stamp = now.with_timezone(&self.timezone).format(STAMP_FORMAT);
        let header = format!("🔥 {} — {}\n", self.display_name, PRODUCT_LABEL);
        let body = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        let footer = format!("\n—\n⏱️ {} ({})\n{}", stamp, self.timezone_name, DISCLAIMER);

        format!("{}{}{}", header, body, footer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::FixedClock;
    use chrono::TimeZone;

    fn composer() -> CaptionComposer {
        let now = Utc.with_ymd_and_hms(2024, 9, 16, 13, 5, 42).unwrap();
        CaptionComposer::new(
            "majed",
            chrono_tz::Asia::Riyadh,
            "Asia/Riyadh",
            Arc::new(FixedClock(now)),
        )
    }

    #[test]
    fn test_full_layout() {
        let caption = composer().compose(&["PUT SPX 5700"]);
        assert_eq!(
            caption,
            "🔥 majed — SPX/Options Bot\n\
             PUT SPX 5700\n\
             —\n\
             ⏱️ 2024-09-16 16:05 (Asia/Riyadh)\n\
             ⚠️ التداول مسؤوليتك الشخصية"
        );
    }

    #[test]
    fn test_lines_keep_order_between_header_and_footer() {
        let lines = ["b", "a", "b"];
        let caption = composer().compose(&lines);
        let header_end = caption.find('\n').unwrap() + 1;
        let footer_start = caption.find("\n—\n").unwrap();
        assert_eq!(&caption[header_end..footer_start], "b\na\nb");
    }

    #[test]
    fn test_deterministic_with_fixed_clock() {
        let c = composer();
        assert_eq!(c.compose(&["x", "y"]), c.compose(&["x", "y"]));
    }

    #[test]
    fn test_timezone_conversion_crosses_midnight() {
        let late = Utc.with_ymd_and_hms(2024, 12, 31, 22, 30, 0).unwrap();
        let caption = composer().compose_at(&["x"], late);
        assert!(caption.contains("⏱️ 2025-01-01 01:30 (Asia/Riyadh)"));
    }
}
