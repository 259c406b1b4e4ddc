//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use tracing::{debug, info};

use crate::domain::{
    AccountSid, AuthToken, LongUrl, SendMessage, ShortUrl, ShortenerTemplate, ValidationError,
};
use crate::transport::{
    TransportError, decode_error_json_response, encode_send_message_form, messages_url,
};

/// Base URL of the Twilio REST API.
pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    fn post_form<'a>(
        &'a self,
        url: &'a str,
        credentials: &'a Credentials,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn post_form<'a>(
        &'a self,
        url: &'a str,
        credentials: &'a Credentials,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(
                    credentials.account_sid.as_str(),
                    Some(credentials.auth_token.as_str()),
                )
                .header(ACCEPT, "application/json")
                .form(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Account credentials for the messaging API.
///
/// The SID doubles as the basic-auth user and as a path segment of the
/// messages endpoint; the token is the basic-auth password.
pub struct Credentials {
    pub account_sid: AccountSid,
    pub auth_token: AuthToken,
}

impl Credentials {
    /// Validate and bundle a SID/token pair.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`].
///
/// This error preserves:
/// - HTTP-level failures (transport failures, non-2xx shortener responses),
/// - API-level failures (non-2xx from the messaging API, decoded or not),
/// - validation failures.
pub enum SmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The shortener answered with a non-successful HTTP status code.
    #[error("unexpected HTTP status from shortener: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The shortener answered successfully but with nothing in the body.
    #[error("shortener returned an empty response body")]
    EmptyShortUrl,

    /// The messaging API rejected the request and explained why.
    #[error(
        "HTTP error {status}, {} {}",
        or_dash(.message),
        or_dash(.more_info)
    )]
    Api {
        status: u16,
        code: Option<i64>,
        message: Option<String>,
        more_info: Option<String>,
    },

    /// The messaging API rejected the request with a body that is not a JSON object.
    #[error("unable to decode HTTP {status} response body: {source}")]
    Decode {
        status: u16,
        #[source]
        source: TransportError,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

#[derive(Debug, Clone)]
/// Builder for [`SmsClient`].
///
/// Use this when you need to customize the API base URL, timeout, or user-agent.
pub struct SmsClientBuilder {
    credentials: Credentials,
    api_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsClientBuilder {
    /// Create a builder with the default API base and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (scheme and host, no trailing path).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set an HTTP client timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsClient`].
    pub fn build(self) -> Result<SmsClient, SmsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsError::Transport(Box::new(err)))?;

        Ok(SmsClient {
            credentials: self.credentials,
            api_base: self.api_base,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Client for the URL shortener and the messaging API.
///
/// Messages are posted to
/// `{api_base}/2010-04-01/Accounts/{sid}/Messages.json`, with
/// `https://api.twilio.com` as the default base.
pub struct SmsClient {
    credentials: Credentials,
    api_base: String,
    http: Arc<dyn HttpTransport>,
}

impl SmsClient {
    /// Create a client using the default API base.
    ///
    /// For more customization, use [`SmsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmsClientBuilder {
        SmsClientBuilder::new(credentials)
    }

    /// Ask the shortener behind `template` for a short form of `long_url`.
    ///
    /// The response body, trimmed, is taken as the short URL.
    ///
    /// Errors:
    /// - [`SmsError::Validation`] if the expanded template is not a valid URL,
    /// - [`SmsError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`SmsError::EmptyShortUrl`] when the body is blank.
    pub async fn shorten(
        &self,
        template: &ShortenerTemplate,
        long_url: &LongUrl,
    ) -> Result<ShortUrl, SmsError> {
        let url = template.expand(long_url)?;
        debug!(%url, "requesting short URL");

        let response = self
            .http
            .get(url.as_str())
            .await
            .map_err(SmsError::Transport)?;
        debug!(status = response.status, "shortener responded");

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        ShortUrl::new(response.body).map_err(|_| SmsError::EmptyShortUrl)
    }

    /// Deliver one message through the messaging API.
    ///
    /// A 2xx status is success and the body is not inspected.
    ///
    /// Errors:
    /// - [`SmsError::Api`] for non-2xx responses carrying a JSON error object,
    /// - [`SmsError::Decode`] for non-2xx responses whose body is not a JSON object.
    pub async fn send_message(&self, request: SendMessage) -> Result<(), SmsError> {
        let url = messages_url(&self.api_base, &self.credentials.account_sid);
        let params = encode_send_message_form(&request);
        debug!(
            %url,
            chars = request.body().chars().count(),
            "sending message"
        );

        let response = self
            .http
            .post_form(&url, &self.credentials, params)
            .await
            .map_err(SmsError::Transport)?;
        let status = response.status;

        if (200..=299).contains(&status) {
            info!(status, "message accepted");
            return Ok(());
        }

        debug!(status, "messaging API rejected the request");
        let parsed = decode_error_json_response(&response.body)
            .map_err(|source| SmsError::Decode { status, source })?;

        Err(SmsError::Api {
            status,
            code: parsed.code,
            message: parsed.message,
            more_info: parsed.more_info,
        })
    }
}
