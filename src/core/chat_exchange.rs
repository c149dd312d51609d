use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ChatReply, ChatRequest};

/// Any way a request to the Khet.ai backend can fail. The chat session treats
/// all variants alike; the distinction only exists for diagnostics.
#[derive(Debug)]
pub enum ExchangeError {
    /// The request could not be sent or the body could not be read.
    Network(reqwest::Error),

    /// The endpoint answered with a non-success status.
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body did not decode into the expected JSON reply.
    Malformed(serde_json::Error),
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::Network(source) => write!(f, "request to Khet.ai backend failed: {source}"),
            ExchangeError::Status { status, body } => {
                let body = body.split_whitespace().collect::<Vec<_>>().join(" ");
                write!(f, "Khet.ai backend returned {status}: {body}")
            }
            ExchangeError::Malformed(source) => {
                write!(f, "Khet.ai backend returned a malformed payload: {source}")
            }
        }
    }
}

impl StdError for ExchangeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ExchangeError::Network(source) => Some(source),
            ExchangeError::Status { .. } => None,
            ExchangeError::Malformed(source) => Some(source),
        }
    }
}

/// Something that can carry one chat request to the assistant and back.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError>;
}

/// Posts JSON to the Khet.ai chat endpoint.
///
/// No timeout is applied: a hung request keeps the session pending until the
/// process exits.
#[derive(Clone)]
pub struct HttpChatTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatTransport {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError> {
        debug!(endpoint = %self.endpoint, language = %request.language, "posting chat request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(ExchangeError::Network)?;

        decode_json_reply(response).await
    }
}

/// Turns a backend response into `T`: non-success statuses keep their body
/// for diagnostics, success bodies must decode as JSON.
pub(crate) async fn decode_json_reply<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ExchangeError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(ExchangeError::Status { status, body });
    }

    let bytes = response.bytes().await.map_err(ExchangeError::Network)?;
    serde_json::from_slice::<T>(&bytes).map_err(ExchangeError::Malformed)
}

/// Result of a spawned exchange, tagged with the id it was spawned under.
#[derive(Debug)]
pub struct ExchangeOutcome {
    pub exchange_id: u64,
    pub result: Result<ChatReply, ExchangeError>,
}

/// Runs exchanges on background tasks and reports outcomes over a channel,
/// so an event loop can keep drawing while a request is in flight.
#[derive(Clone)]
pub struct ChatExchangeService {
    transport: Arc<dyn ChatTransport>,
    tx: mpsc::UnboundedSender<ExchangeOutcome>,
}

impl ChatExchangeService {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
    ) -> (Self, mpsc::UnboundedReceiver<ExchangeOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { transport, tx }, rx)
    }

    pub fn spawn_exchange(&self, request: ChatRequest, exchange_id: u64) {
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = transport.send(&request).await;
            debug!(exchange_id, ok = result.is_ok(), "chat exchange settled");
            let _ = tx.send(ExchangeOutcome {
                exchange_id,
                result,
            });
        });
    }
}
