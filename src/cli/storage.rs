use std::path::PathBuf;

use clap::Parser;

use crate::store::Store;

#[derive(Parser)]
pub struct StorageArgs {
    /// Directory holding the data file and the chart.
    #[clap(long, env = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[clap(long, env = "DATA_FILE_NAME", default_value = "energy_data.json")]
    pub data_file_name: String,

    #[clap(long, env = "CHART_FILE_NAME", default_value = "energy_data.png")]
    pub chart_file_name: String,
}

impl StorageArgs {
    pub fn store(&self) -> Store {
        Store::new(self.output_dir.join(&self.data_file_name))
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_file_name)
    }
}
