//! Liveness probes for remote profile URLs.
//!
//! Fediverse instances shut down and accounts get deleted. Checking the most
//! boosted and most replied actors shows how much of the archive now points
//! nowhere. Each URL gets one `HEAD` request, and the outcome is bucketed as
//! available, not available or gone.
//!
//! Probing is behind the [`Probe`] trait, so the summarizer can be tested
//! without network access. [`HttpProbe`] is the real implementation (feature
//! `probe`).
//!
//! Every probe is independent: a failing URL is classified and the batch
//! continues. Nothing is retried.

use serde::Serialize;
use tracing::debug;

/// Why a profile could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unreachable {
    /// TLS handshake or certificate failure
    Tls,
    /// DNS, refused or reset connection
    Connection,
    /// The request did not finish within the timeout
    Timeout,
}

impl std::fmt::Display for Unreachable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unreachable::Tls => write!(f, "SSL error"),
            Unreachable::Connection => write!(f, "connection error"),
            Unreachable::Timeout => write!(f, "timeout"),
        }
    }
}

impl Unreachable {
    /// Buckets a transport failure by walking its source chain.
    ///
    /// Only the causes are inspected; the top-level message usually repeats
    /// the URL, which may itself contain `ssl` or `tls`.
    pub fn from_error_chain(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string().to_ascii_lowercase();
            if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
                return Unreachable::Tls;
            }
            source = cause.source();
        }
        Unreachable::Connection
    }
}

/// Outcome of probing one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ProbeStatus {
    /// 2xx or 3xx response; holds the status code
    Available(u16),
    /// The request failed before a response arrived
    NotAvailable(Unreachable),
    /// 404 Not Found
    Gone,
    /// Any other status code
    Other(u16),
}

impl ProbeStatus {
    /// Buckets an HTTP status code.
    pub fn from_status(code: u16) -> Self {
        match code {
            200..=399 => ProbeStatus::Available(code),
            404 => ProbeStatus::Gone,
            _ => ProbeStatus::Other(code),
        }
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::Available(code) | ProbeStatus::Other(code) => write!(f, "{}", code),
            ProbeStatus::NotAvailable(reason) => write!(f, "{}", reason),
            ProbeStatus::Gone => write!(f, "404"),
        }
    }
}

/// Something that can check whether a URL is still served.
pub trait Probe {
    /// Checks one URL. Must not panic or propagate errors.
    fn probe(&self, url: &str) -> ProbeStatus;
}

impl<F: Fn(&str) -> ProbeStatus> Probe for F {
    fn probe(&self, url: &str) -> ProbeStatus {
        self(url)
    }
}

/// Results of probing a list of URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Each URL with its outcome, in probe order
    pub results: Vec<(String, ProbeStatus)>,
}

impl ProbeReport {
    /// Number of URLs checked.
    pub fn checked(&self) -> usize {
        self.results.len()
    }

    /// URLs answering with 2xx or 3xx.
    pub fn available(&self) -> usize {
        self.count(|s| matches!(s, ProbeStatus::Available(_)))
    }

    /// URLs that failed at the TLS or connection level.
    pub fn not_available(&self) -> usize {
        self.count(|s| matches!(s, ProbeStatus::NotAvailable(_)))
    }

    /// URLs answering 404.
    pub fn gone(&self) -> usize {
        self.count(|s| matches!(s, ProbeStatus::Gone))
    }

    fn count(&self, pred: impl Fn(&ProbeStatus) -> bool) -> usize {
        self.results.iter().filter(|(_, s)| pred(s)).count()
    }
}

/// Probes every URL in order.
pub fn probe_all<'a, P, I>(prober: &P, urls: I) -> ProbeReport
where
    P: Probe + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let results = urls
        .into_iter()
        .map(|url| {
            let status = prober.probe(url);
            debug!(url, %status, "probed");
            (url.to_string(), status)
        })
        .collect();

    ProbeReport { results }
}

#[cfg(feature = "probe")]
pub use http::HttpProbe;

#[cfg(feature = "probe")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use reqwest::redirect::Policy;

    use super::{Probe, ProbeStatus, Unreachable};
    use crate::config::ProbeConfig;
    use crate::error::{ArchiveError, Result};

    /// Blocking `HEAD` prober backed by reqwest.
    ///
    /// Redirects are not followed: a 3xx answer already proves the server
    /// knows the profile.
    #[derive(Debug, Clone)]
    pub struct HttpProbe {
        client: Client,
    }

    impl HttpProbe {
        /// Builds a prober with the configured timeout.
        pub fn new(config: &ProbeConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .redirect(Policy::none())
                .user_agent(concat!("tootpack/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(ArchiveError::ProbeClient)?;
            Ok(Self { client })
        }
    }

    impl Probe for HttpProbe {
        fn probe(&self, url: &str) -> ProbeStatus {
            match self.client.head(url).send() {
                Ok(response) => ProbeStatus::from_status(response.status().as_u16()),
                Err(err) => ProbeStatus::NotAvailable(classify_failure(&err)),
            }
        }
    }

    /// Maps a transport error to a failure bucket.
    ///
    /// reqwest does not expose TLS failures as a kind, so the source chain is
    /// searched for TLS/certificate wording.
    fn classify_failure(err: &reqwest::Error) -> Unreachable {
        if err.is_timeout() {
            return Unreachable::Timeout;
        }
        Unreachable::from_error_chain(err)
    }
}
