mod quota;

use std::time::Duration;

use bon::bon;
use http::{StatusCode, Uri};
use ureq::Agent;

pub use self::quota::Quota;
use self::quota::Response;
use crate::prelude::*;

/// EcoFlow IoT open API client for a single device.
pub struct Api {
    client: Agent,
    url: Uri,
    serial_number: String,
    app_key: String,
    secret_key: String,
}

#[bon]
impl Api {
    #[builder]
    pub fn new(
        url: Uri,
        #[builder(into)] serial_number: String,
        #[builder(into)] app_key: String,
        #[builder(into)] secret_key: String,
        timeout: Duration,
    ) -> Self {
        let client = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { client, url, serial_number, app_key, secret_key }
    }
}

/// Source of the device quota, the only network collaborator of a run.
pub trait FetchQuota {
    fn fetch_quota(&self) -> Result<Quota, FetchError>;
}

impl FetchQuota for Api {
    #[instrument(skip_all, fields(serial_number = %self.serial_number))]
    fn fetch_quota(&self) -> Result<Quota, FetchError> {
        info!("fetching…");
        let mut response = self
            .client
            .get(self.url.clone())
            .query("sn", &self.serial_number)
            .header("Content-Type", "application/json")
            .header("appKey", &self.app_key)
            .header("secretKey", &self.secret_key)
            .call()?;
        check_status(response.status())?;
        let quota = parse_body(&response.body_mut().read_to_string()?)?;
        info!(
            state_of_charge = %quota.state_of_charge,
            remaining_time = %quota.remaining_time,
            power_out = %quota.power_out,
            power_in = %quota.power_in,
            "fetched",
        );
        Ok(quota)
    }
}

impl<F: Fn() -> Result<Quota, FetchError>> FetchQuota for F {
    fn fetch_quota(&self) -> Result<Quota, FetchError> {
        self()
    }
}

/// Reject before touching the body, so that an unreadable error page still reports the status.
fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status == StatusCode::OK { Ok(()) } else { Err(FetchError::Status(status)) }
}

fn parse_body(body: &str) -> Result<Quota, FetchError> {
    let response = serde_json::from_str::<Response>(body)?;
    debug!(code = ?response.code, message = ?response.message, "parsed");
    response.data.ok_or(FetchError::NoData(response.message))
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("no data in the response ({})", .0.as_deref().unwrap_or("no message"))]
    NoData(Option<String>),
}

impl FetchError {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::MalformedBody(_) => "malformed-body",
            Self::NoData(_) => "no-data",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread::{self, JoinHandle},
    };

    use super::*;
    use crate::quantity::{Minutes, Percent, Watts};

    // language=json
    const BODY: &str = r#"{
        "code": "0",
        "message": "Success",
        "data": {
            "soc": 85,
            "remainTime": 120,
            "wattsOutSum": 300,
            "wattsInSum": 0
        },
        "eagleEyeTraceId": "",
        "tid": ""
    }"#;

    #[test]
    fn parse_body_ok() -> Result {
        let quota = parse_body(BODY)?;
        assert_eq!(quota.state_of_charge, Percent(85.0));
        assert_eq!(quota.remaining_time, Minutes(120.0));
        assert_eq!(quota.power_out, Watts(300.0));
        assert_eq!(quota.power_in, Watts(0.0));
        Ok(())
    }

    #[test]
    fn non_ok_status_fails() {
        let error = check_status(StatusCode::SERVICE_UNAVAILABLE).unwrap_err();
        assert!(
            matches!(error, FetchError::Status(status) if status == StatusCode::SERVICE_UNAVAILABLE)
        );
        assert_eq!(error.kind(), "status");
    }

    #[test]
    fn non_200_success_status_fails() {
        let error = check_status(StatusCode::ACCEPTED).unwrap_err();
        assert!(matches!(error, FetchError::Status(_)));
    }

    #[test]
    fn malformed_body_fails() {
        let error = parse_body("<html>oops</html>").unwrap_err();
        assert_eq!(error.kind(), "malformed-body");
    }

    #[test]
    fn missing_field_fails() {
        // language=json
        let body = r#"{"data": {"soc": 85, "remainTime": 120, "wattsOutSum": 300}}"#;
        let error = parse_body(body).unwrap_err();
        assert_eq!(error.kind(), "malformed-body");
    }

    #[test]
    fn rejected_request_fails() {
        // language=json
        let body = r#"{"code": "8521", "message": "signature is wrong"}"#;
        let error = parse_body(body).unwrap_err();
        assert_eq!(error.kind(), "no-data");
        assert!(error.to_string().contains("signature is wrong"), "{error}");
    }

    #[test]
    fn closure_fetches() -> Result {
        let fetch = || parse_body(BODY);
        assert_eq!(fetch.fetch_quota()?.state_of_charge, Percent(85.0));
        Ok(())
    }

    /// Serve one canned HTTP response on a loopback port, returning the raw request.
    fn serve_once(
        status_line: &str,
        body: &'static [u8],
    ) -> Result<(Api, JoinHandle<std::io::Result<String>>)> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let url: Uri = format!("http://{}/quota", listener.local_addr()?).parse()?;
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len(),
        );
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept()?;
            let mut request = Vec::new();
            let mut buffer = [0; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let n_bytes = stream.read(&mut buffer)?;
                if n_bytes == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..n_bytes]);
            }
            stream.write_all(head.as_bytes())?;
            stream.write_all(body)?;
            Ok(String::from_utf8_lossy(&request).into_owned())
        });
        let api = Api::builder()
            .url(url)
            .serial_number("SN123")
            .app_key("app")
            .secret_key("secret")
            .timeout(Duration::from_secs(5))
            .build();
        Ok((api, server))
    }

    #[test]
    fn fetch_quota_over_http_ok() -> Result {
        let (api, server) = serve_once("200 OK", BODY.as_bytes())?;
        let quota = api.fetch_quota()?;
        assert_eq!(quota.state_of_charge, Percent(85.0));
        assert_eq!(quota.power_out, Watts(300.0));

        let request = server.join().unwrap()?.to_lowercase();
        assert!(request.starts_with("get /quota?sn=sn123 "), "{request}");
        assert!(request.contains("appkey: app\r\n"), "{request}");
        assert!(request.contains("secretkey: secret\r\n"), "{request}");
        Ok(())
    }

    #[test]
    fn unreadable_error_page_reports_status() -> Result {
        let (api, server) = serve_once("503 Service Unavailable", &[0xFF, 0xFE, 0xFD, 0x00])?;
        let error = api.fetch_quota().unwrap_err();
        assert_eq!(error.kind(), "status", "{error}");
        assert!(
            matches!(error, FetchError::Status(status) if status == StatusCode::SERVICE_UNAVAILABLE)
        );
        let _ = server.join();
        Ok(())
    }

    #[test]
    #[ignore = "makes the API request"]
    fn fetch_quota_ok() -> Result {
        let api = Api::builder()
            .url(Uri::from_static(
                "https://api.ecoflow.com/iot-service/open/api/device/queryDeviceQuota",
            ))
            .serial_number(std::env::var("ECOFLOW_SERIAL_NUMBER")?)
            .app_key(std::env::var("ECOFLOW_APP_KEY")?)
            .secret_key(std::env::var("ECOFLOW_SECRET_KEY")?)
            .timeout(Duration::from_secs(10))
            .build();
        let _ = api.fetch_quota()?;
        Ok(())
    }
}
