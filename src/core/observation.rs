use bon::Builder;
use chrono::{NaiveTime, Timelike};

use crate::quantity::{Minutes, Percent, Watts};

/// One sampled reading of the power station.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct Observation {
    /// Local wall-clock capture time, whole seconds.
    pub time: NaiveTime,

    pub state_of_charge: Percent,
    pub remaining_time: Minutes,
    pub power_out: Watts,
    pub power_in: Watts,
}

impl Observation {
    pub fn is_on_the_hour(&self) -> bool {
        self.time.minute() == 0
    }

    /// Format the capture time the way it is stored and labelled.
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}
