use std::time::Duration;

use base64::Engine as _;
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::{
    error::{CoverhueError, Result},
    loader::LoadStrategy,
};

const USER_AGENT: &str = concat!("coverhue/", env!("CARGO_PKG_VERSION"));

fn is_http(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    config.into()
}

/// Blocking GET; timeouts surface as a recoverable `Fetch` error.
fn http_get_bytes(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>> {
    let fetch_error = |error: ureq::Error| CoverhueError::Fetch {
        url: url.to_string(),
        reason: error.to_string(),
    };

    let mut body = agent
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(fetch_error)?
        .into_body();

    body.read_to_vec().map_err(fetch_error)
}

/// Local paths, `file://` URLs and plain HTTP(S) fetches.
pub struct DirectStrategy {
    agent: ureq::Agent,
}

impl DirectStrategy {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: make_agent(timeout),
        }
    }
}

impl LoadStrategy for DirectStrategy {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn supports(&self, source: &str) -> bool {
        !source.starts_with("data:")
    }

    fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        if is_http(source) {
            return http_get_bytes(&self.agent, source);
        }
        let path = source.strip_prefix("file://").unwrap_or(source);
        Ok(std::fs::read(path)?)
    }
}

/// Refetch a remote image through a proxy URL template.
pub struct ProxyStrategy {
    template: String,
    agent: ureq::Agent,
}

impl ProxyStrategy {
    /// `template` must carry a `{url}` placeholder.
    pub fn new(template: &str, timeout: Duration) -> Self {
        Self {
            template: template.to_string(),
            agent: make_agent(timeout),
        }
    }

    pub fn proxied_url(&self, source: &str) -> String {
        let encoded = utf8_percent_encode(source, NON_ALPHANUMERIC).to_string();
        self.template.replace("{url}", &encoded)
    }
}

impl LoadStrategy for ProxyStrategy {
    fn name(&self) -> &'static str {
        "proxy"
    }

    fn supports(&self, source: &str) -> bool {
        is_http(source)
    }

    fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        http_get_bytes(&self.agent, &self.proxied_url(source))
    }
}

/// Inline `data:` URIs, base64 or percent-encoded.
pub struct DataUriStrategy;

impl LoadStrategy for DataUriStrategy {
    fn name(&self) -> &'static str {
        "data-uri"
    }

    fn supports(&self, source: &str) -> bool {
        source.starts_with("data:")
    }

    fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        let invalid = |reason: &str| CoverhueError::ImageDecode(format!("data uri: {reason}"));

        let rest = source.strip_prefix("data:").ok_or_else(|| invalid("missing prefix"))?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| invalid("missing ','"))?;

        if header.ends_with(";base64") {
            base64::engine::general_purpose::STANDARD
                .decode(payload.trim())
                .map_err(|err| invalid(&err.to_string()))
        } else {
            Ok(percent_decode_str(payload).collect())
        }
    }
}
