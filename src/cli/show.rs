use clap::Parser;

use crate::{cli::storage::StorageArgs, prelude::*, tables::build_series_table};

#[derive(Parser)]
pub struct ShowArgs {
    #[clap(flatten)]
    storage: StorageArgs,
}

impl ShowArgs {
    pub fn run(self) -> Result {
        let store = self.storage.store();
        let series = store.load()?;
        let Some(latest) = series.last() else {
            warn!(path = %store.path().display(), "nothing stored yet");
            return Ok(());
        };
        println!("{}", build_series_table(&series));
        info!(
            n_observations = series.len(),
            time = %latest.time_label(),
            state_of_charge = %latest.state_of_charge,
            "latest",
        );
        Ok(())
    }
}
