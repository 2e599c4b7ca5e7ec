//! Pure projections of a committed forecast snapshot.
//!
//! Every function here reads a [`NormalizedForecast`](crate::models::NormalizedForecast)
//! and the current selection; none of them mutate state or suspend.

pub mod advice;
pub mod alerts;
pub mod daily_table;
pub mod day_window;
pub mod indicators;
pub mod paginate;
pub mod series;

pub use advice::{Advice, Tip, TipCategory, UvRisk, WindDescription};
pub use alerts::{Alert, Severity};
pub use daily_table::{DailyRow, UvLevel};
pub use day_window::DayWindow;
pub use indicators::{CurrentIndicators, DayIndicators};
pub use paginate::{clamp_page, page, page_count};
pub use series::SeriesPoint;
