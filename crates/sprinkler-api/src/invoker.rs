// Device API invoker
//
// Wraps `reqwest::Client` with the device's URL scheme, `status` field
// checking, and the cached device address discovered through `/status`.

use tracing::{debug, info, trace};
use url::Url;

use crate::error::Error;
use crate::models::{DeviceResponse, DeviceStatus, StatusEnvelope, ZoneCommand, ZoneId};
use crate::transport::TransportConfig;

/// Address-resolution state of an [`ApiInvoker`].
///
/// `Resolved` is terminal: nothing ever moves an invoker back to
/// `Unresolved`. Build a new invoker to pick up a changed device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Unresolved,
    Resolved(&'a str),
}

/// Client for a single sprinkler controller.
///
/// Starts out addressing the device by `host` (typically its slow-to-resolve
/// mDNS name). The first successful [`get_status`](Self::get_status) caches
/// the `addr` the device reports, and every later request goes there
/// instead. The cache lives exactly as long as this value.
///
/// Operations that can populate the cache take `&mut self`, so one invoker
/// has one owner at a time.
pub struct ApiInvoker {
    http: reqwest::Client,
    host: String,
    host_ip: Option<String>,
}

impl ApiInvoker {
    /// Create an invoker for `host`, building its HTTP client from `transport`.
    pub fn new(host: impl Into<String>, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, host))
    }

    /// Create an invoker around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, host: impl Into<String>) -> Self {
        Self {
            http,
            host: host.into(),
            host_ip: None,
        }
    }

    /// The host this invoker was constructed with.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The cached device address, once resolved.
    pub fn host_ip(&self) -> Option<&str> {
        self.host_ip.as_deref()
    }

    pub fn resolution(&self) -> Resolution<'_> {
        match self.host_ip.as_deref() {
            Some(ip) => Resolution::Resolved(ip),
            None => Resolution::Unresolved,
        }
    }

    /// Where requests currently go: the cached address if there is one,
    /// otherwise the original host.
    pub fn target(&self) -> &str {
        self.host_ip.as_deref().unwrap_or(&self.host)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `http://{target}{path}`; `path` carries its own leading slash.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("http://{}{path}", self.target()))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET and require `"status": "ok"` in the JSON reply.
    ///
    /// Returns the full response on success. A body whose `status` is
    /// anything else (or absent) fails with [`Error::Protocol`] carrying the
    /// raw body text.
    pub async fn get_url(&self, path: &str) -> Result<DeviceResponse, Error> {
        let (response, _) = self.get_checked(path).await?;
        Ok(response)
    }

    async fn get_checked(&self, path: &str) -> Result<(DeviceResponse, StatusEnvelope), Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let http_status = resp.status();
        let body = resp.text().await?;

        let envelope = decode_envelope(&body)?;
        if !envelope.is_ok() {
            return Err(Error::Protocol { body });
        }

        Ok((DeviceResponse { http_status, body }, envelope))
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Fetch `/status`, cache the device's `addr`, and return the raw body.
    ///
    /// On failure the cached address is left exactly as it was.
    pub async fn get_status(&mut self) -> Result<String, Error> {
        let (response, envelope) = self.get_checked("/status").await?;

        let Some(addr) = envelope.addr().map(str::to_owned) else {
            return Err(Error::Deserialization {
                message: "status response has no string `addr` field".into(),
                body: response.body,
            });
        };

        info!(host = %self.host, addr = %addr, "resolved device address");
        self.host_ip = Some(addr);
        Ok(response.body)
    }

    /// [`get_status`](Self::get_status), decoded into a [`DeviceStatus`].
    pub async fn device_status(&mut self) -> Result<DeviceStatus, Error> {
        let body = self.get_status().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    // ── Zones ────────────────────────────────────────────────────────

    /// `GET /zone/{zone}/on`
    pub async fn turn_zone_on(&mut self, zone: impl Into<ZoneId>) -> Result<(), Error> {
        self.zone_command(&zone.into(), ZoneCommand::On).await
    }

    /// `GET /zone/{zone}/off`
    pub async fn turn_zone_off(&mut self, zone: impl Into<ZoneId>) -> Result<(), Error> {
        self.zone_command(&zone.into(), ZoneCommand::Off).await
    }

    /// `GET /zone/{zone}/toggle`
    pub async fn toggle_zone(&mut self, zone: impl Into<ZoneId>) -> Result<(), Error> {
        self.zone_command(&zone.into(), ZoneCommand::Toggle).await
    }

    /// Send a zone command, resolving the device address first if needed.
    ///
    /// The device's reply is read but not inspected: neither its HTTP status
    /// nor its `status` field can fail this call. Only transport errors do.
    pub async fn zone_command(&mut self, zone: &ZoneId, command: ZoneCommand) -> Result<(), Error> {
        self.ensure_resolved().await?;

        let url = self.url(&format!("/zone/{zone}/{command}"))?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let http_status = resp.status();
        resp.bytes().await?;
        trace!(%zone, %command, %http_status, "zone command sent");

        Ok(())
    }

    async fn ensure_resolved(&mut self) -> Result<(), Error> {
        if self.host_ip.is_none() {
            self.get_status().await?;
        }
        Ok(())
    }
}

fn decode_envelope(body: &str) -> Result<StatusEnvelope, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}
