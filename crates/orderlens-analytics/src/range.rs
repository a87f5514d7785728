//! Date windows and the named range presets.

use std::fmt;

use chrono::{DateTime, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use orderlens_core::NormalizedOrder;

/// Returns the orders dated within `[start, end]`, inclusive on both ends,
/// preserving input order.
#[must_use]
pub fn filter_range(
    orders: &[NormalizedOrder],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<NormalizedOrder> {
    let kept: Vec<NormalizedOrder> = orders
        .iter()
        .filter(|o| o.order_date >= start && o.order_date <= end)
        .cloned()
        .collect();
    tracing::debug!(
        %start,
        %end,
        kept = kept.len(),
        total = orders.len(),
        "filtered orders by date range"
    );
    kept
}

/// An inclusive time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window covering whole local calendar days: from 00:00:00 on `from`
    /// through 23:59:59 on `to`.
    #[must_use]
    pub fn from_days(from: NaiveDate, to: NaiveDate) -> Self {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Self {
            start: local_to_utc(from.and_time(NaiveTime::MIN)),
            end: local_to_utc(to.and_time(end_of_day)),
        }
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }

    #[must_use]
    pub fn apply(&self, orders: &[NormalizedOrder]) -> Vec<NormalizedOrder> {
        filter_range(orders, self.start, self.end)
    }
}

/// Interprets a naive datetime in the local zone. A time skipped by a DST
/// transition falls back to UTC.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Named look-back windows ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePreset {
    /// `1y`: twelve calendar months.
    LastYear,
    /// `3m`: three calendar months.
    LastThreeMonths,
    /// `30d`: thirty calendar days.
    LastThirtyDays,
    #[default]
    All,
}

impl RangePreset {
    /// Maps a preset name to a preset. Unrecognized names select [`RangePreset::All`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "1y" => Self::LastYear,
            "3m" => Self::LastThreeMonths,
            "30d" => Self::LastThirtyDays,
            _ => Self::All,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastYear => "1y",
            Self::LastThreeMonths => "3m",
            Self::LastThirtyDays => "30d",
            Self::All => "all",
        }
    }

    /// Resolves the preset to a concrete window ending at `now`.
    ///
    /// Subtraction follows the local calendar: month arithmetic clamps to the
    /// last valid day (May 31 minus three months is Feb 28/29). `All` starts
    /// at the Unix epoch.
    #[must_use]
    pub fn resolve(self, now: DateTime<Utc>) -> DateWindow {
        let local = now.with_timezone(&Local);
        let cutoff = match self {
            Self::LastYear => local.checked_sub_months(Months::new(12)),
            Self::LastThreeMonths => local.checked_sub_months(Months::new(3)),
            Self::LastThirtyDays => local.checked_sub_days(Days::new(30)),
            Self::All => None,
        };
        let start = cutoff.map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.with_timezone(&Utc));
        DateWindow::new(start, now)
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration};

    use super::*;

    fn at(date: DateTime<Utc>) -> NormalizedOrder {
        NormalizedOrder {
            order_date: date,
            total_cost: 1.0,
            restaurant_name: "A".to_owned(),
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn filter_range_is_inclusive_at_both_ends() {
        let start = utc(2024, 1, 1, 0);
        let end = utc(2024, 1, 31, 0);
        let orders = vec![
            at(start - Duration::seconds(1)),
            at(start),
            at(utc(2024, 1, 15, 12)),
            at(end),
            at(end + Duration::seconds(1)),
        ];

        let kept = filter_range(&orders, start, end);

        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].order_date, start);
        assert_eq!(kept[2].order_date, end);
    }

    #[test]
    fn filter_range_with_inverted_bounds_is_empty() {
        let orders = vec![at(utc(2024, 1, 15, 12))];
        assert!(filter_range(&orders, utc(2024, 2, 1, 0), utc(2024, 1, 1, 0)).is_empty());
    }

    #[test]
    fn parse_known_presets() {
        assert_eq!(RangePreset::parse("1y"), RangePreset::LastYear);
        assert_eq!(RangePreset::parse("3m"), RangePreset::LastThreeMonths);
        assert_eq!(RangePreset::parse(" 30D "), RangePreset::LastThirtyDays);
        assert_eq!(RangePreset::parse("all"), RangePreset::All);
    }

    #[test]
    fn parse_unknown_preset_is_all() {
        assert_eq!(RangePreset::parse("6w"), RangePreset::All);
        assert_eq!(RangePreset::parse(""), RangePreset::All);
    }

    #[test]
    fn all_starts_at_epoch() {
        let now = utc(2024, 7, 1, 12);
        let window = RangePreset::All.resolve(now);
        assert_eq!(window.start, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(window.end, now);
    }

    #[test]
    fn thirty_days_subtracts_calendar_days() {
        let now = utc(2024, 7, 1, 12);
        let window = RangePreset::LastThirtyDays.resolve(now);

        let start_local = window.start.with_timezone(&Local);
        let now_local = now.with_timezone(&Local);
        assert_eq!(
            start_local.date_naive(),
            now_local.date_naive() - Days::new(30)
        );
        assert_eq!(window.end, now);
    }

    #[test]
    fn year_and_quarter_subtract_calendar_months() {
        let now = utc(2024, 7, 15, 12);
        let now_local = now.with_timezone(&Local);

        let year = RangePreset::LastYear.resolve(now).start.with_timezone(&Local);
        assert_eq!(year.year(), now_local.year() - 1);
        assert_eq!(year.month(), now_local.month());
        assert_eq!(year.day(), now_local.day());

        let quarter = RangePreset::LastThreeMonths
            .resolve(now)
            .start
            .with_timezone(&Local);
        assert_eq!(quarter.month() + 3, now_local.month());
        assert_eq!(quarter.day(), now_local.day());
    }

    #[test]
    fn from_days_covers_whole_local_days() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();

        let window = DateWindow::from_days(from, to);

        let start = window.start.with_timezone(&Local).naive_local();
        let end = window.end.with_timezone(&Local).naive_local();
        assert_eq!(start, from.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(end, to.and_hms_opt(23, 59, 59).unwrap());
        assert!(window.contains(window.end));
        assert!(!window.contains(window.end + Duration::seconds(1)));
    }

    #[test]
    fn from_days_single_day_window() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let window = DateWindow::from_days(day, day);
        assert_eq!(window.end - window.start, Duration::seconds(86_399));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for preset in [
            RangePreset::LastYear,
            RangePreset::LastThreeMonths,
            RangePreset::LastThirtyDays,
            RangePreset::All,
        ] {
            assert_eq!(RangePreset::parse(&preset.to_string()), preset);
        }
    }
}
