use clap::Parser;

use crate::{chart, cli::storage::StorageArgs, prelude::*};

#[derive(Parser)]
pub struct RenderArgs {
    #[clap(flatten)]
    storage: StorageArgs,
}

impl RenderArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let store = self.storage.store();
        let _lock = store.lock()?;
        chart::render(&store.load()?, &self.storage.chart_path())
    }
}
