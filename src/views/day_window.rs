//! Hourly indices belonging to one calendar day

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::ForecastError;
use crate::models::NormalizedForecast;

/// Contiguous run of hourly indices whose timestamps fall on one day.
///
/// Because `hourly.time` is strictly increasing the matching indices are
/// always contiguous, so a half-open range describes them exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub indices: Range<usize>,
}

impl DayWindow {
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// No hourly data for this day
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> Range<usize> {
        self.indices.clone()
    }
}

/// Single pass over `hours`: skip earlier days, take the run on `date`,
/// stop at the first later timestamp.
#[must_use]
pub fn resolve(hours: &[NaiveDateTime], date: NaiveDate) -> DayWindow {
    let mut start = None;
    let mut end = hours.len();

    for (i, hour) in hours.iter().enumerate() {
        let day = hour.date();
        if day < date {
            continue;
        }
        if day > date {
            end = i;
            break;
        }
        start.get_or_insert(i);
    }

    let indices = match start {
        Some(start) => start..end,
        None => 0..0,
    };
    DayWindow { date, indices }
}

/// Window for day `index` of a snapshot.
pub fn resolve_day(forecast: &NormalizedForecast, index: usize) -> Result<DayWindow, ForecastError> {
    forecast.check_day(index)?;
    Ok(resolve(&forecast.hourly.time, forecast.daily.time[index]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::fixtures::{at, date, forecast};

    #[test]
    fn test_full_days() {
        let forecast = forecast(7, 7 * 24);
        for day in 0..7 {
            let window = resolve_day(&forecast, day).unwrap();
            assert_eq!(window.indices, day * 24..(day + 1) * 24);
            assert_eq!(window.date, forecast.daily.time[day]);
        }
    }

    #[test]
    fn test_window_is_exactly_the_matching_hours() {
        let forecast = forecast(7, 60);
        for day in 0..7 {
            let window = resolve_day(&forecast, day).unwrap();
            let expected: Vec<usize> = (0..forecast.hourly.len())
                .filter(|&i| forecast.hourly.time[i].date() == forecast.daily.time[day])
                .collect();
            assert_eq!(window.iter().collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn test_partial_last_day() {
        // 60 hours: two full days and 12 hours of the third
        let forecast = forecast(7, 60);
        assert_eq!(resolve_day(&forecast, 2).unwrap().indices, 48..60);
    }

    #[test]
    fn test_day_without_hours_is_empty() {
        let forecast = forecast(7, 30);
        let window = resolve_day(&forecast, 5).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
    }

    #[test]
    fn test_day_index_out_of_range() {
        let forecast = forecast(3, 72);
        assert!(matches!(
            resolve_day(&forecast, 3),
            Err(ForecastError::DayOutOfRange { index: 3, days: 3 })
        ));
    }

    #[test]
    fn test_resolve_before_first_hour() {
        let hours = vec![at(2, 0), at(2, 1), at(3, 0)];
        assert!(resolve(&hours, date(1)).is_empty());
        assert_eq!(resolve(&hours, date(2)).indices, 0..2);
        assert_eq!(resolve(&hours, date(3)).indices, 2..3);
        assert!(resolve(&[], date(1)).is_empty());
    }
}
