//! HTTPS implementation of the signature/deadline source client

use crate::config::StoreClientConfig;
use async_trait::async_trait;
use rescue_core::effects::RecoveryStoreEffects;
use rescue_core::{GuardianSignature, RecoveryId, RecoveryUpdate, RescueError, Result};
use serde::Deserialize;
use tracing::debug;

/// Wire shape of one stored guardian signature
#[derive(Debug, Deserialize)]
struct SignatureDto {
    address: rescue_core::Address,
    signature: rescue_core::Bytes,
}

/// Wire shape of the source's poll response
#[derive(Debug, Deserialize)]
struct RecoveryDto {
    #[serde(default)]
    signatures: Vec<SignatureDto>,
    #[serde(default)]
    deadline: Option<u64>,
    #[serde(default)]
    signatures_needed: Option<u16>,
}

impl From<RecoveryDto> for RecoveryUpdate {
    fn from(dto: RecoveryDto) -> Self {
        RecoveryUpdate {
            signatures: dto
                .signatures
                .into_iter()
                .map(|sig| GuardianSignature::new(sig.address, sig.signature))
                .collect(),
            deadline: dto.deadline,
            signatures_needed: dto.signatures_needed,
        }
    }
}

/// HTTP client for the service storing guardian signatures and deadlines
///
/// Fetches `GET <base>/recovery/<identifier>`. The endpoint is idempotent
/// and designed to be hit on a short cadence; every failure maps to a
/// transient error so the poller retries at the next tick.
pub struct HttpRecoveryStore {
    config: StoreClientConfig,
    client: reqwest::Client,
}

impl HttpRecoveryStore {
    /// Build a client for the source at the configured base URL
    pub fn new(config: StoreClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| RescueError::internal(format!("http client setup failed: {err}")))?;
        Ok(Self { config, client })
    }

    fn recovery_url(&self, id: &RecoveryId) -> String {
        format!(
            "{}/recovery/{}",
            self.config.base_url.trim_end_matches('/'),
            id
        )
    }
}

#[async_trait]
impl RecoveryStoreEffects for HttpRecoveryStore {
    async fn fetch_recovery(&self, id: &RecoveryId) -> Result<RecoveryUpdate> {
        let url = self.recovery_url(id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| RescueError::transient(format!("fetch failed: {err}")))?;

        if !response.status().is_success() {
            return Err(RescueError::transient(format!(
                "source returned {} for {url}",
                response.status()
            )));
        }

        let dto: RecoveryDto = response
            .json()
            .await
            .map_err(|err| RescueError::transient(format!("malformed source response: {err}")))?;
        debug!(recovery = %id, signatures = dto.signatures.len(), "fetched recovery state");
        Ok(dto.into())
    }
}
