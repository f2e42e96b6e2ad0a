// UI load tester
//
// Repeatedly fetches the device's static UI files and counts the 200s.
// Large or unminified UI files are the usual reason the board starts
// dropping responses, and this is how that shows up.

use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Files fetched by a load test, in order.
pub const UI_FILES: [&str; 2] = ["index.html", "sprinklers.js"];

/// Host targeted when none is given (the test board).
pub const DEFAULT_HOST: &str = "192.168.7.65";

/// Requests per file when no count is given.
pub const DEFAULT_REPEAT: u32 = 500;

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file: String,
    pub repeat: u32,
    /// Responses that came back `200 OK`.
    pub okay: u32,
}

/// Outcome for a whole run, one entry per file in [`UI_FILES`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTestReport {
    pub host: String,
    pub files: Vec<FileReport>,
}

/// Progress notifications emitted while a run is under way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTestEvent<'a> {
    Started { host: &'a str },
    FileStarted { file: &'a str, repeat: u32 },
    FileFinished(&'a FileReport),
}

/// Sequential GET load against `http://{host}/{file}`.
///
/// A non-200 response only lowers the count. A transport error ends the
/// whole run and is returned as is.
pub struct UiLoadTester {
    http: reqwest::Client,
    host: String,
}

impl UiLoadTester {
    pub fn new(host: impl Into<String>, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, host))
    }

    pub fn with_client(http: reqwest::Client, host: impl Into<String>) -> Self {
        Self {
            http,
            host: host.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url_for(&self, file: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("http://{}/{file}", self.host))?)
    }

    /// One GET; `true` when the device answered `200 OK`.
    ///
    /// The body is read to the end so that a truncated transfer surfaces as
    /// a transport error rather than passing as a success.
    pub async fn is_response_200(&self, file: &str) -> Result<bool, Error> {
        let url = self.url_for(file)?;
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        resp.bytes().await?;
        Ok(status == reqwest::StatusCode::OK)
    }

    /// Fetch `file` `repeat` times, one request after another.
    pub async fn count_okay(&self, file: &str, repeat: u32) -> Result<u32, Error> {
        let mut okay = 0;
        for attempt in 0..repeat {
            if self.is_response_200(file).await? {
                okay += 1;
            } else {
                debug!(file, attempt, "non-200 response");
            }
        }
        Ok(okay)
    }

    /// Run the full test over [`UI_FILES`], reporting progress to `on_event`.
    ///
    /// An error from `on_event` stops the run before any further request is
    /// sent and is returned as is.
    pub async fn run<E>(
        &self,
        repeat: u32,
        mut on_event: impl FnMut(LoadTestEvent<'_>) -> Result<(), E>,
    ) -> Result<LoadTestReport, E>
    where
        E: From<Error>,
    {
        on_event(LoadTestEvent::Started { host: &self.host })?;

        let mut files = Vec::with_capacity(UI_FILES.len());
        for file in UI_FILES {
            on_event(LoadTestEvent::FileStarted { file, repeat })?;

            let okay = self.count_okay(file, repeat).await?;
            info!(host = %self.host, file, okay, repeat, "file load test finished");

            let report = FileReport {
                file: file.to_owned(),
                repeat,
                okay,
            };
            on_event(LoadTestEvent::FileFinished(&report))?;
            files.push(report);
        }

        Ok(LoadTestReport {
            host: self.host.clone(),
            files,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn files_are_fetched_from_host_root() {
        let tester = UiLoadTester::with_client(reqwest::Client::new(), "sptest.local");
        assert_eq!(
            tester.url_for("sprinklers.js").unwrap().as_str(),
            "http://sptest.local/sprinklers.js"
        );
    }

    #[test]
    fn file_order_is_fixed() {
        assert_eq!(UI_FILES, ["index.html", "sprinklers.js"]);
    }
}
