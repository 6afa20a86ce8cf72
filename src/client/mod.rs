//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    AccountId, ChunkReport, Password, QueryLog, QueryLogResult, ReserveDelete,
    ReserveDeleteResult, SEND_BATCH_SIZE, SendResult, SendSms, ValidationError, batch,
};
use crate::transport::{
    decode_query_log_response, decode_reserve_delete_response, decode_send_response,
    encode_query_log_form, encode_reserve_delete_form, encode_send_form,
};

const DEFAULT_BASE_URL: &str = "http://api.message.net.tw/";
const DEFAULT_SEND_PATH: &str = "send.php";
const DEFAULT_QUERY_LOG_PATH: &str = "query.php";
const DEFAULT_RESERVE_DELETE_PATH: &str = "del.php";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            // Raw bytes: log cells are Big5, which `text()` would mangle.
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Account credentials sent (`id`, `password`) with every gateway request.
pub struct Credential {
    id: AccountId,
    password: Password,
}

impl Credential {
    /// Validate and bundle an account id and password.
    pub fn new(
        id: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: AccountId::new(id)?,
            password: Password::new(password)?,
        })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        params.push((AccountId::FIELD.to_owned(), self.id.as_str().to_owned()));
        params.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MessageNetClient`] and its builder.
///
/// A request error means no gateway reply was obtained. Anything the gateway itself reports
/// (including its own failures) arrives as `error_code` in the parsed result instead.
pub enum GatewayError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// One of the domain constructors or the builder rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`MessageNetClient`].
///
/// Use this when you need to point the client at another host (a staging gateway or a
/// mock server), or customize the timeout or user-agent.
pub struct MessageNetClientBuilder {
    credential: Credential,
    base_url: String,
    send_path: String,
    query_log_path: String,
    reserve_delete_path: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MessageNetClientBuilder {
    /// Create a builder with the default gateway URL and no timeout/user-agent override.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            base_url: DEFAULT_BASE_URL.to_owned(),
            send_path: DEFAULT_SEND_PATH.to_owned(),
            query_log_path: DEFAULT_QUERY_LOG_PATH.to_owned(),
            reserve_delete_path: DEFAULT_RESERVE_DELETE_PATH.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the base URL every path is resolved against.
    ///
    /// Paths are joined with URL semantics: keep a trailing `/` on a base that has a path
    /// component, or its last segment gets replaced.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the path of the send endpoint (default `send.php`).
    pub fn send_path(mut self, path: impl Into<String>) -> Self {
        self.send_path = path.into();
        self
    }

    /// Override the path of the log query endpoint (default `query.php`).
    pub fn query_log_path(mut self, path: impl Into<String>) -> Self {
        self.query_log_path = path.into();
        self
    }

    /// Override the path of the reservation delete endpoint (default `del.php`).
    pub fn reserve_delete_path(mut self, path: impl Into<String>) -> Self {
        self.reserve_delete_path = path.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`MessageNetClient`].
    pub fn build(self) -> Result<MessageNetClient, GatewayError> {
        let base = parse_url(&self.base_url)?;
        let endpoints = Endpoints {
            send: join_url(&base, &self.send_path)?,
            query_log: join_url(&base, &self.query_log_path)?,
            reserve_delete: join_url(&base, &self.reserve_delete_path)?,
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| GatewayError::Transport(Box::new(err)))?;

        Ok(MessageNetClient {
            credential: self.credential,
            endpoints,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn parse_url(input: &str) -> Result<Url, ValidationError> {
    Url::parse(input).map_err(|err| ValidationError::InvalidUrl {
        input: input.to_owned(),
        reason: err.to_string(),
    })
}

fn join_url(base: &Url, path: &str) -> Result<String, ValidationError> {
    base.join(path)
        .map(String::from)
        .map_err(|err| ValidationError::InvalidUrl {
            input: path.to_owned(),
            reason: err.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoints {
    send: String,
    query_log: String,
    reserve_delete: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            send: format!("{DEFAULT_BASE_URL}{DEFAULT_SEND_PATH}"),
            query_log: format!("{DEFAULT_BASE_URL}{DEFAULT_QUERY_LOG_PATH}"),
            reserve_delete: format!("{DEFAULT_BASE_URL}{DEFAULT_RESERVE_DELETE_PATH}"),
        }
    }
}

#[derive(Clone)]
/// High-level gateway client.
///
/// This type attaches credentials, encodes forms, and parses the gateway's `key=value`
/// replies. By default it talks to `http://api.message.net.tw/` (`send.php`, `query.php`,
/// `del.php`).
///
/// Requests are issued one at a time. Gateway-reported failures come back as data in the
/// parsed result (`error_code`); only failures to get a reply at all are errors.
pub struct MessageNetClient {
    credential: Credential,
    endpoints: Endpoints,
    http: Arc<dyn HttpTransport>,
}

impl MessageNetClient {
    /// Create a client using the default gateway URL.
    ///
    /// For more customization, use [`MessageNetClient::builder`].
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            endpoints: Endpoints::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credential: Credential) -> MessageNetClientBuilder {
        MessageNetClientBuilder::new(credential)
    }

    /// Send a message, splitting the recipients into chunks of at most
    /// [`crate::SEND_MAX_RECIPIENTS_PER_REQUEST`].
    ///
    /// Chunks go out sequentially and in order. A chunk that fails in transport is recorded
    /// in its [`ChunkReport`] and the remaining chunks are still sent, so check each report
    /// before trusting its outcome. No recipients means no requests and an empty result.
    pub async fn send(&self, request: SendSms) -> SendResult {
        let mut chunks = Vec::new();
        for chunk in batch(request.recipients(), SEND_BATCH_SIZE) {
            let params = encode_send_form(&request, chunk.items);
            let result = self
                .post(&self.endpoints.send, params)
                .await
                .map(|body| decode_send_response(&body));

            match &result {
                Ok(outcome) => tracing::debug!(
                    chunk = chunk.index,
                    recipients = chunk.items.len(),
                    error_code = outcome.error_code.as_i32(),
                    "send chunk delivered"
                ),
                Err(err) => tracing::warn!(
                    chunk = chunk.index,
                    recipients = chunk.items.len(),
                    error = %err,
                    "send chunk failed"
                ),
            }
            chunks.push(ChunkReport {
                recipients: chunk.range(),
                result,
            });
        }
        SendResult { chunks }
    }

    /// Query the log of sent messages. One request, no batching.
    ///
    /// Returns [`GatewayError::Transport`] only when no reply was received. The reply body is
    /// parsed whatever its HTTP status.
    pub async fn query_log(&self, request: QueryLog) -> Result<QueryLogResult, GatewayError> {
        let params = encode_query_log_form(&request);
        let body = self
            .post(&self.endpoints.query_log, params)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "query log failed"))?;
        Ok(decode_query_log_response(&body))
    }

    /// Cancel scheduled messages. [`ReserveDelete::All`] cancels every reservation on the
    /// account.
    ///
    /// Returns [`GatewayError::Transport`] only when no reply was received.
    pub async fn reserve_delete(
        &self,
        request: ReserveDelete,
    ) -> Result<ReserveDeleteResult, GatewayError> {
        if request == ReserveDelete::All {
            tracing::info!("deleting all reserved messages");
        }
        let params = encode_reserve_delete_form(&request);
        let body = self
            .post(&self.endpoints.reserve_delete, params)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "reserve delete failed"))?;
        Ok(decode_reserve_delete_response(&body))
    }

    async fn post(
        &self,
        url: &str,
        extra: Vec<(String, String)>,
    ) -> Result<Vec<u8>, GatewayError> {
        let mut params = Vec::<(String, String)>::with_capacity(extra.len() + 2);
        self.credential.push_form_params(&mut params);
        params.extend(extra);

        tracing::debug!(url, "posting gateway request");
        let response = self
            .http
            .post_form(url, params)
            .await
            .map_err(GatewayError::Transport)?;

        // ErrorCode in the body is authoritative; the status is only logged.
        if !(200..=299).contains(&response.status) {
            tracing::warn!(url, status = response.status, "gateway replied with non-2xx status");
        }

        Ok(response.body)
    }
}
