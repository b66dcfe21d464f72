/// Upstream schedule source
///
/// Narrow fetch interface over the schedule API plus its production
/// HTTP implementation. Each refresh cycle calls each family at most
/// once; retry policy is deliberately left to the operator.

use crate::error::{Result, ScheduleError};
use crate::schedule::config::ScheduleConfig;
use crate::schedule::models::{TimeSlot, VersusSchedules};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Where the upstream hangs a schedule payload.
#[derive(Debug, Deserialize)]
struct VersusEnvelope {
    result: VersusSchedules,
}

#[derive(Debug, Deserialize)]
struct SalmonEnvelope {
    results: Vec<TimeSlot>,
}

/// Provider of schedule snapshots, one method per schedule family.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch_versus(&self) -> Result<VersusSchedules>;
    async fn fetch_salmon(&self) -> Result<Vec<TimeSlot>>;
}

/// Production source talking to the schedule API over HTTP.
pub struct HttpScheduleSource {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl HttpScheduleSource {
    pub fn new(config: &ScheduleConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// The Salmon-Run feed lives beside the versus feed:
    /// `<base>/api/schedule` to `<base>/api/coop-grouping-regular/schedule`.
    fn salmon_url(&self) -> Result<String> {
        let base = Url::parse(&self.base_url)
            .map_err(|err| ScheduleError::Config(format!("bad api base url: {}", err)))?;
        let url = base
            .join("coop-grouping-regular/schedule")
            .map_err(|err| ScheduleError::Config(format!("bad api base url: {}", err)))?;
        Ok(url.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleSource {
    async fn fetch_versus(&self) -> Result<VersusSchedules> {
        let envelope: VersusEnvelope = self.get_json(&self.base_url).await?;
        Ok(envelope.result)
    }

    async fn fetch_salmon(&self) -> Result<Vec<TimeSlot>> {
        let url = self.salmon_url()?;
        let envelope: SalmonEnvelope = self.get_json(&url).await?;
        Ok(envelope.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_with_base(base: &str) -> HttpScheduleSource {
        let config = ScheduleConfig {
            api_base: base.to_string(),
            user_agent: "test".to_string(),
            cache_dir: std::env::temp_dir(),
            ttl: chrono::Duration::minutes(30),
        };
        HttpScheduleSource::new(&config).unwrap()
    }

    #[test]
    fn test_salmon_url_is_a_sibling_of_the_versus_feed() {
        let source = source_with_base("https://spla3.yuu26.com/api/schedule");
        assert_eq!(
            source.salmon_url().unwrap(),
            "https://spla3.yuu26.com/api/coop-grouping-regular/schedule"
        );
    }

    #[test]
    fn test_bad_base_url_is_a_config_error() {
        let source = source_with_base("not a url");
        assert!(matches!(
            source.salmon_url(),
            Err(ScheduleError::Config(_))
        ));
    }

    #[test]
    fn test_envelopes_unwrap_payloads() {
        let versus: VersusEnvelope = serde_json::from_str(
            r#"{"result": {"regular": [], "bankara_challenge": [], "bankara_open": [], "x": []}}"#,
        )
        .unwrap();
        assert!(versus.result.regular.is_empty());

        let salmon: SalmonEnvelope = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(salmon.results.is_empty());
    }
}
