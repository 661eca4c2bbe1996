use serde::Deserialize;

use crate::{
    core::Observation,
    quantity::{Minutes, Percent, Watts},
};

/// Response envelope of the device quota endpoint.
#[derive(Deserialize)]
pub struct Response {
    /// API status code, `"0"` on success.
    #[serde(default)]
    pub code: Option<serde_json::Value>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Option<Quota>,
}

/// Instant readings of the four tracked metrics.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct Quota {
    #[serde(rename = "soc")]
    pub state_of_charge: Percent,

    #[serde(rename = "remainTime")]
    pub remaining_time: Minutes,

    #[serde(rename = "wattsOutSum")]
    pub power_out: Watts,

    #[serde(rename = "wattsInSum")]
    pub power_in: Watts,
}

impl Quota {
    pub fn observed_at(self, time: chrono::NaiveTime) -> Observation {
        Observation::builder()
            .time(time)
            .state_of_charge(self.state_of_charge)
            .remaining_time(self.remaining_time)
            .power_out(self.power_out)
            .power_in(self.power_in)
            .build()
    }
}
