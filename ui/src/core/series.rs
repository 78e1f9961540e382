//! Day-indexed event counts and the weekday × hour activity matrix.

use api::{EventCount, HeatmapRow};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::debug;

pub const HOURS_PER_DAY: usize = 24;
pub const DAYS_PER_WEEK: usize = 7;

/// Canonical row order of the heatmap.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Parse a backend day label.
///
/// Accepts `2026-01-10`, an RFC 3339 timestamp, or the RFC 2822 form some JSON encoders emit
/// for plain dates (`Sat, 10 Jan 2026 00:00:00 GMT`).
pub fn parse_day(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .or_else(|| OffsetDateTime::parse(raw, &Rfc3339).ok().map(|dt| dt.date()))
        .or_else(|| OffsetDateTime::parse(raw, &Rfc2822).ok().map(|dt| dt.date()))
}

pub fn format_day(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Points dated on or after `min_date`, in their original order.
///
/// Points whose date can't be read are dropped, since they can't be placed on the axis.
pub fn filter_series(series: &[EventCount], min_date: Date) -> Vec<EventCount> {
    series
        .iter()
        .filter(|point| match parse_day(&point.date) {
            Some(day) => day >= min_date,
            None => {
                debug!(date = %point.date, "dropping point with unreadable date");
                false
            }
        })
        .cloned()
        .collect()
}

pub fn hour_label(hour: usize) -> String {
    format!("{hour:02}:00")
}

pub fn weekday_label(index: usize) -> String {
    WEEKDAY_LABELS
        .get(index)
        .map(|label| label.to_string())
        .unwrap_or_else(|| format!("Day {}", index + 1))
}

/// Seven weekdays × 24 hours of event counts.
///
/// `None` means the backend sent nothing for that hour, which is not the same as a zero count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapMatrix {
    cells: [[Option<u64>; HOURS_PER_DAY]; DAYS_PER_WEEK],
    max_value: u64,
}

impl Default for HeatmapMatrix {
    fn default() -> Self {
        Self {
            cells: [[None; HOURS_PER_DAY]; DAYS_PER_WEEK],
            max_value: 0,
        }
    }
}

impl HeatmapMatrix {
    /// Lay out backend rows by position: row 0 is Monday, row 6 Sunday, extras are ignored.
    pub fn from_rows(rows: &[HeatmapRow]) -> Self {
        let mut matrix = Self::default();

        for (day, row) in rows.iter().take(DAYS_PER_WEEK).enumerate() {
            let mut hours: Vec<(usize, u64)> = row
                .iter()
                .filter_map(|(key, count)| match key.trim().parse::<usize>() {
                    Ok(hour) if hour < HOURS_PER_DAY => Some((hour, *count)),
                    _ => {
                        debug!(day, key = %key, "skipping heatmap key outside 0..24");
                        None
                    }
                })
                .collect();
            hours.sort_by_key(|(hour, _)| *hour);

            for (hour, count) in hours {
                matrix.cells[day][hour] = Some(count);
            }
        }

        matrix.max_value = matrix
            .cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0);
        matrix
    }

    pub fn cell(&self, day: usize, hour: usize) -> Option<u64> {
        self.cells.get(day)?.get(hour).copied().flatten()
    }

    pub fn row(&self, day: usize) -> Option<&[Option<u64>; HOURS_PER_DAY]> {
        self.cells.get(day)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &[Option<u64>; HOURS_PER_DAY])> {
        WEEKDAY_LABELS.iter().copied().zip(self.cells.iter())
    }

    /// Largest count in the matrix; the upper bound of the colour scale.
    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    /// Position of `count` on the colour scale, `0.0..=1.0`.
    pub fn intensity(&self, count: u64) -> f64 {
        if self.max_value == 0 {
            0.0
        } else {
            (count as f64 / self.max_value as f64).clamp(0.0, 1.0)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }
}
