use clap::Parser;
use http::Uri;

use crate::api::ecoflow;

#[derive(Parser)]
pub struct EcoFlowApiArgs {
    /// Device quota endpoint, the serial number is appended as the `sn` query parameter.
    #[clap(
        long = "api-url",
        env = "ECOFLOW_API_URL",
        default_value = "https://api.ecoflow.com/iot-service/open/api/device/queryDeviceQuota"
    )]
    pub url: Uri,

    #[clap(long, alias = "serial", env = "ECOFLOW_SERIAL_NUMBER")]
    pub serial_number: String,

    #[clap(long, env = "ECOFLOW_APP_KEY", hide_env_values = true)]
    pub app_key: String,

    #[clap(long, env = "ECOFLOW_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    #[clap(long, env = "ECOFLOW_TIMEOUT", default_value = "10s")]
    pub timeout: humantime::Duration,
}

impl EcoFlowApiArgs {
    pub fn new_client(&self) -> ecoflow::Api {
        ecoflow::Api::builder()
            .url(self.url.clone())
            .serial_number(&self.serial_number)
            .app_key(&self.app_key)
            .secret_key(&self.secret_key)
            .timeout(self.timeout.into())
            .build()
    }
}
