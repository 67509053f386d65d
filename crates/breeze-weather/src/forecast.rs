//! Forecast filtering and display labels.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::types::{ForecastEntry, Units, WeatherSnapshot};

/// Number of slots in the hourly strip (8 x 3h = one day).
pub const HOURLY_SLOTS: usize = 8;

/// Shown where a temperature has not been fetched yet.
pub const PLACEHOLDER: &str = "--";

/// Entries stamped exactly at noon, one per day.
pub fn daily_at_noon(entries: &[ForecastEntry]) -> Vec<ForecastEntry> {
    entries
        .iter()
        .filter(|e| {
            let t = e.timestamp.time();
            (t.hour(), t.minute(), t.second()) == (12, 0, 0)
        })
        .cloned()
        .collect()
}

/// The first `count` entries, or all of them if the series is shorter.
pub fn next_hours(entries: &[ForecastEntry], count: usize) -> Vec<ForecastEntry> {
    entries.iter().take(count).cloned().collect()
}

/// "Tomorrow" for the day after `today`, otherwise the full weekday name.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if today.succ_opt() == Some(date) {
        "Tomorrow".to_string()
    } else {
        date.format("%A").to_string()
    }
}

/// `HH:MM` of the slot.
pub fn hour_label(timestamp: NaiveDateTime) -> String {
    timestamp.format("%H:%M").to_string()
}

/// Temperature rounded toward zero, e.g. `21°C`.
pub fn temperature_label(temperature: Option<f64>, units: Units) -> String {
    match temperature {
        Some(t) => format!("{}{}", t.trunc() as i64, units.symbol()),
        None => PLACEHOLDER.to_string(),
    }
}

/// Low/high range with the low floored and the high ceiled, e.g. `16°C / 20°C`.
pub fn range_label(min: f64, max: f64, units: Units) -> String {
    format!(
        "{}{} / {}{}",
        min.floor() as i64,
        units.symbol(),
        max.ceil() as i64,
        units.symbol()
    )
}

/// Header row of the weather screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRow {
    pub city: String,
    pub temperature: String,
    pub description: String,
    pub icon: &'static str,
}

impl CurrentRow {
    /// Placeholders when nothing has been fetched.
    pub fn from_snapshot(snapshot: Option<&WeatherSnapshot>, units: Units) -> Self {
        match snapshot {
            Some(s) => Self {
                city: s.city.clone(),
                temperature: temperature_label(Some(s.temperature), units),
                description: s.description.clone(),
                icon: s.condition().icon_name(),
            },
            None => Self {
                city: PLACEHOLDER.to_string(),
                temperature: PLACEHOLDER.to_string(),
                description: String::new(),
                icon: "cloud",
            },
        }
    }
}

/// One cell of the hourly strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyCell {
    pub hour: String,
    pub temperature: String,
    pub description: String,
    pub icon: &'static str,
}

/// One row of the five-day list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRow {
    pub day: String,
    pub range: String,
    pub icon: &'static str,
}

pub fn hourly_cells(entries: &[ForecastEntry], units: Units) -> Vec<HourlyCell> {
    next_hours(entries, HOURLY_SLOTS)
        .into_iter()
        .map(|e| HourlyCell {
            hour: hour_label(e.timestamp),
            temperature: temperature_label(Some(e.temp), units),
            icon: e.condition().icon_name(),
            description: e.description,
        })
        .collect()
}

pub fn daily_rows(entries: &[ForecastEntry], today: NaiveDate, units: Units) -> Vec<DailyRow> {
    daily_at_noon(entries)
        .into_iter()
        .map(|e| DailyRow {
            day: day_label(e.timestamp.date(), today),
            range: range_label(e.temp_min, e.temp_max, units),
            icon: e.condition().icon_name(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::types::FORECAST_TIME_FORMAT;

    fn entry(dt_txt: &str, temp: f64) -> ForecastEntry {
        ForecastEntry {
            timestamp: NaiveDateTime::parse_from_str(dt_txt, FORECAST_TIME_FORMAT).unwrap(),
            temp,
            temp_min: temp - 1.5,
            temp_max: temp + 1.5,
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
        }
    }

    /// Five days of 3-hourly slots starting at midnight on 2024-03-01.
    fn five_days() -> Vec<ForecastEntry> {
        (0..40)
            .map(|i| {
                let day = 1 + i / 8;
                let hour = (i % 8) * 3;
                entry(&format!("2024-03-{:02} {:02}:00:00", day, hour), 10.0 + i as f64)
            })
            .collect()
    }

    #[test]
    fn test_daily_keeps_only_noon() {
        let daily = daily_at_noon(&five_days());
        assert_eq!(daily.len(), 5);
        assert!(daily.iter().all(|e| hour_label(e.timestamp) == "12:00"));
    }

    #[test]
    fn test_daily_ignores_noon_minutes() {
        let entries = vec![entry("2024-03-01 12:30:00", 1.0), entry("2024-03-01 11:00:00", 2.0)];
        assert!(daily_at_noon(&entries).is_empty());
    }

    #[test]
    fn test_hourly_takes_first_eight() {
        let entries = five_days();
        let hourly = next_hours(&entries, HOURLY_SLOTS);
        assert_eq!(hourly.len(), 8);
        assert_eq!(hourly[0], entries[0]);
        assert_eq!(hourly[7], entries[7]);
    }

    #[test]
    fn test_hourly_shorter_series() {
        let entries: Vec<_> = five_days().into_iter().take(3).collect();
        assert_eq!(next_hours(&entries, HOURLY_SLOTS).len(), 3);
        assert!(next_hours(&[], HOURLY_SLOTS).is_empty());
    }

    #[test]
    fn test_day_labels() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(); // Friday
        assert_eq!(day_label(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), today), "Tomorrow");
        assert_eq!(day_label(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(), today), "Sunday");
        assert_eq!(day_label(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), today), "Friday");
    }

    #[test]
    fn test_temperature_label_truncates() {
        assert_eq!(temperature_label(Some(21.9), Units::Metric), "21°C");
        assert_eq!(temperature_label(Some(-3.7), Units::Metric), "-3°C");
        assert_eq!(temperature_label(Some(-0.4), Units::Imperial), "0°F");
        assert_eq!(temperature_label(None, Units::Metric), "--");
    }

    #[test]
    fn test_range_label() {
        assert_eq!(range_label(16.9, 19.1, Units::Metric), "16°C / 20°C");
    }

    #[test]
    fn test_daily_rows() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let rows = daily_rows(&five_days(), today, Units::Metric);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].day, "Tomorrow");
        assert_eq!(rows[1].day, "Saturday");
        // 2024-03-01 12:00 is slot 4, temp 14.0
        assert_eq!(rows[0].range, "12°C / 16°C");
        assert_eq!(rows[0].icon, "cloud");
    }

    #[test]
    fn test_hourly_cells() {
        let cells = hourly_cells(&five_days(), Units::Metric);
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[1].hour, "03:00");
        assert_eq!(cells[1].temperature, "11°C");
        assert_eq!(cells[1].description, "scattered clouds");
    }

    #[test]
    fn test_current_row_placeholder() {
        let row = CurrentRow::from_snapshot(None, Units::Metric);
        assert_eq!(row.temperature, "--");
        assert_eq!(row.city, "--");

        let snapshot = WeatherSnapshot {
            temperature: 25.6,
            city: "Isfahan".to_string(),
            condition_icon: "01d".to_string(),
            description: "clear sky".to_string(),
        };
        let row = CurrentRow::from_snapshot(Some(&snapshot), Units::Metric);
        assert_eq!(row.temperature, "25°C");
        assert_eq!(row.icon, "sun");
    }
}
