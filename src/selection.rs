//! User selection and the reducer that drives it

use serde::Serialize;

use crate::models::{Location, Measurement};

/// What the user is looking at. Survives across fetches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub location: Location,
    pub measurement: Measurement,
    pub day: usize,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectLocation(Location),
    SelectMeasurement(Measurement),
    SelectDay(usize),
    SetPage(usize),
    /// Re-fetch the current location after a failure
    Retry,
}

/// Side effect declared by the reducer, carried out by the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(Location),
}

impl Selection {
    #[must_use]
    pub fn new(location: Location, measurement: Measurement) -> Self {
        Self {
            location,
            measurement,
            day: 0,
            page: 0,
        }
    }

    /// Next selection plus the effect to run, if any.
    ///
    /// Range checks on `day` and `page` need the committed snapshot and are
    /// left to the caller.
    #[must_use]
    pub fn reduce(&self, action: Action) -> (Selection, Option<Effect>) {
        match action {
            Action::SelectLocation(location) => {
                if location == self.location {
                    return (self.clone(), None);
                }
                let next = Selection {
                    location: location.clone(),
                    measurement: self.measurement,
                    day: 0,
                    page: 0,
                };
                (next, Some(Effect::Fetch(location)))
            }
            Action::SelectMeasurement(measurement) => {
                if measurement == self.measurement {
                    return (self.clone(), None);
                }
                let next = Selection {
                    measurement,
                    page: 0,
                    ..self.clone()
                };
                (next, None)
            }
            Action::SelectDay(day) => {
                if day == self.day {
                    return (self.clone(), None);
                }
                let next = Selection {
                    day,
                    page: 0,
                    ..self.clone()
                };
                (next, None)
            }
            Action::SetPage(page) => (Selection { page, ..self.clone() }, None),
            Action::Retry => (self.clone(), Some(Effect::Fetch(self.location.clone()))),
        }
    }
}
