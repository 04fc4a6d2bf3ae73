use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Series '{series}' is not strictly ascending: {current} follows {previous}")]
    UnorderedDates {
        series: String,
        previous: NaiveDate,
        current: NaiveDate,
    },
}
