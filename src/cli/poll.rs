use std::path::Path;

use chrono::{Local, NaiveTime, Timelike};
use clap::Parser;

use crate::{
    api::ecoflow::FetchQuota,
    chart,
    cli::{ecoflow::EcoFlowApiArgs, storage::StorageArgs},
    prelude::*,
    store::Store,
};

#[derive(Parser)]
pub struct PollArgs {
    #[clap(flatten)]
    ecoflow: EcoFlowApiArgs,

    #[clap(flatten)]
    storage: StorageArgs,
}

impl PollArgs {
    pub fn run(self) -> Result<Outcome> {
        let store = self.storage.store();
        let _lock = store.lock()?;
        poll(&self.ecoflow.new_client(), &store, &self.storage.chart_path(), now)
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Appended { n_observations: usize },

    /// The fetch failed, nothing was touched.
    Skipped,
}

/// Load the series, append one fresh observation, re-render the chart, and persist.
///
/// A failed fetch is logged and leaves both the data file and the chart untouched.
#[instrument(skip_all)]
pub fn poll(
    source: &impl FetchQuota,
    store: &Store,
    chart_path: &Path,
    clock: impl FnOnce() -> NaiveTime,
) -> Result<Outcome> {
    let mut series = store.load()?;

    let quota = match source.fetch_quota() {
        Ok(quota) => quota,
        Err(error) => {
            error!(kind = error.kind(), "error fetching data: {error}");
            return Ok(Outcome::Skipped);
        }
    };

    series.push(quota.observed_at(clock()));
    chart::render(&series, chart_path)?;
    store.persist(&series)?;

    info!(n_observations = series.len(), "appended");
    Ok(Outcome::Appended { n_observations: series.len() })
}

fn now() -> NaiveTime {
    let now = Local::now().time();
    now.with_nanosecond(0).unwrap_or(now)
}
