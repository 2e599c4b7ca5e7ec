//! Dashboard controller
//!
//! Owns the selection, the forecast state and the derived-view memo behind a
//! single async mutex. `dispatch` applies user actions and spawns fetch tasks;
//! `view` projects the committed snapshot into everything a front end renders.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info_span, instrument};

use crate::ForecastError;
use crate::config::DashboardConfig;
use crate::memo::Memo;
use crate::models::{Location, Measurement};
use crate::selection::{Action, Effect, Selection};
use crate::state::{ForecastState, Snapshot, Status};
use crate::views::{
    Advice, Alert, CurrentIndicators, DailyRow, DayIndicators, DayWindow, SeriesPoint, advice,
    alerts, daily_table, day_window, indicators, paginate, series,
};
use crate::weather::ForecastFetcher;

type SeriesKey = (u64, Measurement, usize);

#[derive(Debug)]
struct Inner {
    selection: Selection,
    state: ForecastState,
    series: Memo<SeriesKey, Vec<SeriesPoint>>,
}

/// Everything derived from one committed snapshot plus the current selection
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub status: Status,
    /// Displayable message of the last failed fetch
    pub error: Option<String>,
    pub selection: Selection,
    /// Location of the snapshot being shown, which lags the selection while loading
    pub location: Option<Location>,
    pub stale: bool,
    pub fetched_at: Option<DateTime<Utc>>,
    pub current: Option<CurrentIndicators>,
    pub day: Option<DayIndicators>,
    pub alerts: Vec<Alert>,
    /// Full day series for the chart
    pub series: Vec<SeriesPoint>,
    /// Current page of `series` for the table
    pub hourly_page: Vec<SeriesPoint>,
    pub page_count: usize,
    pub page_size: usize,
    pub daily_rows: Vec<DailyRow>,
    pub advice: Option<Advice>,
}

pub struct Dashboard<F: ForecastFetcher> {
    fetcher: Arc<F>,
    inner: Arc<Mutex<Inner>>,
    page_size: usize,
}

impl<F: ForecastFetcher> Clone for Dashboard<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            inner: Arc::clone(&self.inner),
            page_size: self.page_size,
        }
    }
}

impl<F: ForecastFetcher> Dashboard<F> {
    /// A dashboard in `Idle`. The first `SelectLocation`, even of the
    /// preselected location, or a [`refresh`](Self::refresh) starts loading.
    pub fn new(fetcher: F, selection: Selection, page_size: usize) -> Result<Self, ForecastError> {
        if page_size == 0 {
            return Err(ForecastError::InvalidPageSize { size: page_size });
        }
        Ok(Self {
            fetcher: Arc::new(fetcher),
            inner: Arc::new(Mutex::new(Inner {
                selection,
                state: ForecastState::new(),
                series: Memo::new(),
            })),
            page_size,
        })
    }

    pub fn from_config(fetcher: F, config: &DashboardConfig) -> Result<Self, ForecastError> {
        let selection = Selection::new(config.default_location()?, config.default_measurement()?);
        Self::new(fetcher, selection, config.defaults.page_size)
    }

    /// Fetch the selected location again without touching the selection.
    pub async fn refresh(&self) -> Result<Option<JoinHandle<()>>, ForecastError> {
        self.dispatch(Action::Retry).await
    }

    /// Apply an action. Returns the handle of the spawned fetch task when the
    /// action triggered one.
    ///
    /// `SelectDay` is checked against the committed snapshot and fails with
    /// `DayOutOfRange`; `SetPage` is clamped to the last hourly page.
    #[instrument(skip(self))]
    pub async fn dispatch(&self, action: Action) -> Result<Option<JoinHandle<()>>, ForecastError> {
        let mut inner = self.inner.lock().await;

        let action = match action {
            Action::SelectDay(day) => {
                let days = inner
                    .state
                    .snapshot()
                    .map_or(0, |snapshot| snapshot.forecast.days());
                if day >= days {
                    return Err(ForecastError::DayOutOfRange { index: day, days });
                }
                Action::SelectDay(day)
            }
            Action::SetPage(page) => {
                let hours = window_for(&inner).map_or(0, |window| window.len());
                Action::SetPage(paginate::clamp_page(page, hours, self.page_size)?)
            }
            // Nothing fetched yet: the preselected location still has to load
            Action::SelectLocation(location)
                if inner.state.status() == Status::Idle && location == inner.selection.location =>
            {
                Action::Retry
            }
            other => other,
        };

        let (next, effect) = inner.selection.reduce(action);
        inner.selection = next;

        let Some(Effect::Fetch(location)) = effect else {
            return Ok(None);
        };

        let seq = inner.state.begin(&location);
        drop(inner);

        Ok(Some(self.spawn_fetch(seq, location)))
    }

    fn spawn_fetch(&self, seq: u64, location: Location) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let inner = Arc::clone(&self.inner);
        let span = info_span!("forecast_fetch", seq, location = %location.name);

        tokio::spawn(
            async move {
                let result = fetcher.fetch(&location).await;
                let mut inner = inner.lock().await;
                let outcome = inner.state.settle(seq, location, result);
                debug!(?outcome, "Fetch settled");
            }
            .instrument(span),
        )
    }

    pub async fn selection(&self) -> Selection {
        self.inner.lock().await.selection.clone()
    }

    pub async fn status(&self) -> Status {
        self.inner.lock().await.state.status()
    }

    /// One page of the daily table, using the dashboard page size. Empty
    /// before the first snapshot and past the last page.
    pub async fn daily_page(&self, page: usize) -> Result<Vec<DailyRow>, ForecastError> {
        let inner = self.inner.lock().await;
        let Some(snapshot) = inner.state.snapshot() else {
            return Ok(Vec::new());
        };
        let rows = daily_table::rows(&snapshot.forecast);
        Ok(paginate::page(&rows, self.page_size, page)?.to_vec())
    }

    /// Derive the full view from the committed snapshot.
    pub async fn view(&self) -> DashboardView {
        let mut inner = self.inner.lock().await;
        let selection = inner.selection.clone();
        let status = inner.state.status();
        let error = inner.state.error().map(ForecastError::user_message);
        let stale = inner.state.is_stale();

        let mut view = DashboardView {
            status,
            error,
            selection: selection.clone(),
            location: None,
            stale,
            fetched_at: None,
            current: None,
            day: None,
            alerts: Vec::new(),
            series: Vec::new(),
            hourly_page: Vec::new(),
            page_count: 0,
            page_size: self.page_size,
            daily_rows: Vec::new(),
            advice: None,
        };

        let Some(snapshot) = inner.state.snapshot().cloned() else {
            return view;
        };
        let forecast = Arc::clone(&snapshot.forecast);

        view.location = Some(snapshot.location.clone());
        view.fetched_at = Some(snapshot.fetched_at);
        view.current = Some(indicators::current(&forecast));
        view.alerts = alerts::evaluate_forecast(&forecast);
        view.daily_rows = daily_table::rows(&forecast);

        // Selection may point past a shorter snapshot; day-scoped views stay empty.
        let Ok(window) = day_window::resolve_day(&forecast, selection.day) else {
            return view;
        };

        let series = inner
            .series
            .get_or_compute((snapshot.id, selection.measurement, selection.day), || {
                series::project_measurement(&forecast.hourly, selection.measurement, &window)
            });

        view.day = indicators::compute(&forecast, selection.day).ok();
        view.advice = advice::advise(&forecast, &window, selection.day).ok();
        view.page_count = paginate::page_count(series.len(), self.page_size).unwrap_or(0);
        view.hourly_page = paginate::page(series.as_slice(), self.page_size, selection.page)
            .map(<[SeriesPoint]>::to_vec)
            .unwrap_or_default();
        view.series = series.to_vec();

        view
    }

    #[cfg(test)]
    async fn memo_stats(&self) -> (u64, u64) {
        let inner = self.inner.lock().await;
        (inner.series.hits(), inner.series.misses())
    }
}

fn window_for(inner: &Inner) -> Option<DayWindow> {
    let snapshot: &Snapshot = inner.state.snapshot()?;
    day_window::resolve_day(&snapshot.forecast, inner.selection.day).ok()
}
