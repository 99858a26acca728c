//! A seam between an adapter's parsing logic and the network.
//!
//! spec.md §1 puts real HTTP fetching out of scope; adapters here take a
//! [`Fetcher`] instead of hardcoding `reqwest` calls, so their parsing and
//! matching logic is exercised the same way whether the body came from a
//! live vendor or a fixture string.

pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> anyhow::Result<String>;
}

/// A test double returning canned bodies keyed by url, standing in for the
/// real fetch implementation a deployment would wire in (one backed by
/// `reqwest`, matching the rest of the corpus's HTTP stack).
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    bodies: std::collections::HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<String> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no fixture body registered for {url}"))
    }
}

/// The real fetch implementation, a blocking `reqwest` client built the
/// same way `download_scryfall_data` builds its client: a fixed user
/// agent and a generous timeout for vendor pages that can be slow.
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(ReqwestFetcher { client })
    }
}

impl Fetcher for ReqwestFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            anyhow::bail!("request to {url} failed: HTTP {}", response.status());
        }
        Ok(response.text()?)
    }
}
