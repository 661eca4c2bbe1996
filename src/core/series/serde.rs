//! Column-oriented persisted form of [`Series`].
//!
//! Each metric is stored as its own array, and index `i` of every array
//! refers to the same observation.

use chrono::NaiveTime;
use itertools::izip;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_with::{DeserializeAs, SerializeAs, serde_as};

use crate::{
    core::{Observation, Series},
    quantity::{Minutes, Percent, Watts},
};

const TIME_FORMAT: &str = "%H:%M:%S";

#[serde_as]
#[derive(Serialize, Deserialize)]
pub struct Columns {
    #[serde(rename = "soc_data")]
    state_of_charge: Vec<Percent>,

    #[serde(rename = "remain_time_data")]
    remaining_time: Vec<Minutes>,

    #[serde(rename = "watts_out_data")]
    power_out: Vec<Watts>,

    #[serde(rename = "watts_in_data")]
    power_in: Vec<Watts>,

    #[serde_as(as = "Vec<TimeLabel>")]
    #[serde(rename = "time_labels")]
    time: Vec<NaiveTime>,
}

#[derive(Debug, thiserror::Error)]
#[error(
    "misaligned columns: {n_times} time labels, {n_state_of_charge} SoC, {n_remaining_time} remaining time, {n_power_out} watts out, {n_power_in} watts in"
)]
pub struct MisalignedColumns {
    n_times: usize,
    n_state_of_charge: usize,
    n_remaining_time: usize,
    n_power_out: usize,
    n_power_in: usize,
}

impl TryFrom<Columns> for Series {
    type Error = MisalignedColumns;

    fn try_from(columns: Columns) -> Result<Self, Self::Error> {
        let n_times = columns.time.len();
        if [
            columns.state_of_charge.len(),
            columns.remaining_time.len(),
            columns.power_out.len(),
            columns.power_in.len(),
        ]
        .into_iter()
        .any(|len| len != n_times)
        {
            return Err(MisalignedColumns {
                n_times,
                n_state_of_charge: columns.state_of_charge.len(),
                n_remaining_time: columns.remaining_time.len(),
                n_power_out: columns.power_out.len(),
                n_power_in: columns.power_in.len(),
            });
        }
        Ok(izip!(
            columns.time,
            columns.state_of_charge,
            columns.remaining_time,
            columns.power_out,
            columns.power_in,
        )
        .map(|(time, state_of_charge, remaining_time, power_out, power_in)| Observation {
            time,
            state_of_charge,
            remaining_time,
            power_out,
            power_in,
        })
        .collect())
    }
}

impl From<Series> for Columns {
    fn from(series: Series) -> Self {
        let mut columns = Self {
            state_of_charge: Vec::with_capacity(series.len()),
            remaining_time: Vec::with_capacity(series.len()),
            power_out: Vec::with_capacity(series.len()),
            power_in: Vec::with_capacity(series.len()),
            time: Vec::with_capacity(series.len()),
        };
        for observation in &series {
            columns.state_of_charge.push(observation.state_of_charge);
            columns.remaining_time.push(observation.remaining_time);
            columns.power_out.push(observation.power_out);
            columns.power_in.push(observation.power_in);
            columns.time.push(observation.time);
        }
        columns
    }
}

/// `HH:MM:SS` wall-clock label.
struct TimeLabel;

impl SerializeAs<NaiveTime> for TimeLabel {
    fn serialize_as<S: Serializer>(source: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&source.format(TIME_FORMAT))
    }
}

impl<'de> DeserializeAs<'de, NaiveTime> for TimeLabel {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let label = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&label, TIME_FORMAT)
            .map_err(|error| D::Error::custom(format!("invalid time label `{label}`: {error}")))
    }
}
