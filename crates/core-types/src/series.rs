use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated reading. `value` is `None` when nothing was recorded for the date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// An immutable, named sequence of observations sorted strictly ascending by date.
///
/// Construction is the only place ordering is checked; every consumer may rely
/// on the dates being unique and increasing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    name: String,
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Builds a series, rejecting duplicate or out-of-order dates.
    ///
    /// Non-finite values (NaN, infinities) are stored as absent.
    pub fn new(
        name: impl Into<String>,
        mut observations: Vec<Observation>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        for observation in &mut observations {
            observation.value = observation.value.filter(|v| v.is_finite());
        }
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CoreError::UnorderedDates {
                    series: name,
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }
        Ok(Self { name, observations })
    }

    /// Convenience constructor for fully-recorded series.
    pub fn from_values<I>(name: impl Into<String>, points: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let observations = points
            .into_iter()
            .map(|(date, value)| Observation::new(date, Some(value)))
            .collect();
        Self::new(name, observations)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of observations that carry a value.
    pub fn recorded(&self) -> usize {
        self.observations.iter().filter(|o| o.value.is_some()).count()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Returns the same series under a different name.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            observations: self.observations,
        }
    }

    /// Keeps only observations inside the inclusive window. Either bound may be open.
    pub fn clipped(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let observations = self
            .observations
            .iter()
            .filter(|o| start.is_none_or(|s| o.date >= s) && end.is_none_or(|e| o.date <= e))
            .copied()
            .collect();
        Self {
            name: self.name.clone(),
            observations,
        }
    }
}
