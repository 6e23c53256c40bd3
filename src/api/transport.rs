use std::time::Duration;

use serde_json::Value;

use super::error::Error;

/// Narrow boundary to the HTTP layer: one blocking JSON POST per call,
/// answering with the parsed response document.
pub trait Transport {
    fn post(&self, url: &str, body: &Value) -> Result<Value, Error>;
}

/* The firmware's embedded web server rejects unknown user agents. */
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.0; WOW64; rv:24.0) Gecko/20100101 Firefox/24.0";

/// Production [`Transport`] over a blocking `reqwest` client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .http1_only()
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, body: &Value) -> Result<Value, Error> {
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(http::header::CONTENT_TYPE, "application/json")
            .header(http::header::ACCEPT, "application/json, text/plain, */*")
            .json(body)
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!("{} responded {}", url, status)));
        }

        let text = response
            .text()
            .map_err(|e| Error::Transport(format!("error reading response from {}: {}", url, e)))?;

        serde_json::from_str(&text)
            .map_err(|e| Error::Protocol(format!("unparseable response from {}: {}", url, e)))
    }
}
