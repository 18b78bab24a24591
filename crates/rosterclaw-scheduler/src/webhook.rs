//! HTTP webhook assignment engine — hands occurrence batches to an
//! external auto-assignment service. The attendee-selection heuristic
//! lives entirely on the remote side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use rosterclaw_core::error::{Result, RosterError};
use rosterclaw_core::traits::AssignmentEngine;

/// Assignment capability reached over HTTP: POST one JSON batch per chunk,
/// read the assigned count back.
pub struct WebhookAssigner {
    url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct AssignRequest<'a> {
    occurrence_ids: &'a [i64],
    scheduler_person_id: i64,
}

#[derive(Deserialize)]
struct AssignResponse {
    #[serde(default)]
    assigned: u64,
}

impl WebhookAssigner {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AssignmentEngine for WebhookAssigner {
    async fn auto_assign(
        &mut self,
        occurrence_ids: &[i64],
        scheduler_person_id: i64,
    ) -> Result<u64> {
        let response = self
            .client
            .post(&self.url)
            .json(&AssignRequest {
                occurrence_ids,
                scheduler_person_id,
            })
            .timeout(std::time::Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| RosterError::Assignment(format!("Webhook send: {e}")))?;
        if !response.status().is_success() {
            return Err(RosterError::Assignment(format!(
                "Webhook returned {}",
                response.status()
            )));
        }
        let body: AssignResponse = response
            .json()
            .await
            .map_err(|e| RosterError::Assignment(format!("Webhook response: {e}")))?;
        tracing::debug!(
            "🌐 Assignment webhook took {} occurrence(s), {} assigned",
            occurrence_ids.len(),
            body.assigned
        );
        Ok(body.assigned)
    }
}
