//! HTTP connector client implementing `ChannelOperations`.
//!
//! Talks to a Bot Framework style connector service:
//!
//! | Operation          | Request                                 |
//! |--------------------|-----------------------------------------|
//! | `send_to_channel`  | `POST /v3/conversations`                |
//! | `get_team_details` | `GET /v3/teams/{id}`                    |
//! | `get_channels`     | `GET /v3/teams/{id}/conversations`      |
//! | `get_members`      | `GET /v3/conversations/{id}/members`    |
//!
//! Every transport or status failure is reported as
//! `DialogError::ChannelUnavailable`. Requests are not retried.

use async_trait::async_trait;
use parlance_core::channel::{
    Activity, ChannelAccount, ChannelInfo, ChannelOperations, ConversationReference, TeamDetails,
};
use parlance_core::error::{DialogError, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connector client bound to a single service endpoint.
#[derive(Debug, Clone)]
pub struct ConnectorClient {
    client: Client,
    service_url: String,
    bearer_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConversationParameters<'a> {
    is_group: bool,
    channel_data: Value,
    activity: &'a Activity,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationResourceResponse {
    id: String,
    #[serde(default)]
    activity_id: Option<String>,
}

#[derive(Deserialize)]
struct ConversationList {
    #[serde(default)]
    conversations: Vec<ChannelInfo>,
}

impl ConnectorClient {
    /// Creates a client for `service_url` with the default timeout.
    pub fn new(service_url: impl Into<String>) -> Result<Self> {
        Self::with_options(service_url, None, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with an optional bearer token and request timeout.
    pub fn with_options(
        service_url: impl Into<String>,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let service_url = service_url.into();
        if service_url.trim().is_empty() {
            return Err(DialogError::invalid_argument(
                "connector service_url cannot be empty",
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DialogError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            service_url: service_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.filter(|token| !token.is_empty()),
        })
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.service_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<T> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| unavailable(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DialogError::channel_unavailable(format!(
                "{}: connector returned {}: {}",
                operation, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| unavailable(operation, e))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, operation: &str) -> Result<T> {
        let url = self.url(path);
        debug!(operation, url = %url, "connector request");
        self.send_json(self.client.get(&url), operation).await
    }
}

fn unavailable(operation: &str, err: reqwest::Error) -> DialogError {
    DialogError::channel_unavailable(format!("{}: {}", operation, err))
}

/// Escapes a single path segment; connector ids routinely contain `:`, `@` and `;`.
fn segment(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b':' | b'@') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

#[async_trait]
impl ChannelOperations for ConnectorClient {
    async fn send_to_channel(
        &self,
        conversation: &ConversationReference,
        activity: &Activity,
        channel_id: &str,
    ) -> Result<(ConversationReference, String)> {
        let params = ConversationParameters {
            is_group: true,
            channel_data: json!({ "channel": { "id": channel_id } }),
            activity,
        };
        let url = self.url("/v3/conversations");
        debug!(operation = "send_to_channel", url = %url, channel_id, "connector request");

        let created: ConversationResourceResponse = self
            .send_json(self.client.post(&url).json(&params), "send_to_channel")
            .await?;

        let mut reference = conversation.clone();
        reference.conversation.id = created.id;
        reference.activity_id = created.activity_id.clone();
        Ok((reference, created.activity_id.unwrap_or_default()))
    }

    async fn get_team_details(&self, team_id: &str) -> Result<TeamDetails> {
        self.get(&format!("/v3/teams/{}", segment(team_id)), "get_team_details")
            .await
    }

    async fn get_channels(&self, team_id: &str) -> Result<Vec<ChannelInfo>> {
        let list: ConversationList = self
            .get(
                &format!("/v3/teams/{}/conversations", segment(team_id)),
                "get_channels",
            )
            .await?;
        Ok(list.conversations)
    }

    async fn get_members(&self, conversation_id: &str) -> Result<Vec<ChannelAccount>> {
        self.get(
            &format!("/v3/conversations/{}/members", segment(conversation_id)),
            "get_members",
        )
        .await
    }
}
