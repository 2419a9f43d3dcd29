//! Main EditTableClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::api::Command;
use crate::auth::ValidationKeyProvider;
use crate::config::EditConfig;
use crate::error::ApiError;
use crate::error::Error;
use crate::response::SaveOutcome;
use crate::transport::HttpTransport;
use crate::transport::Transport;

/// The client for the wiki's row-editing REST handler.
///
/// Cheap to clone (uses `Arc` internally); every table session on a page
/// shares one.
///
/// # Example
///
/// ```ignore
/// use edittable_lib::{EditTableClient, auth::StaticValidationKey};
///
/// let client = EditTableClient::builder()
///     .url("https://wiki.example.org")
///     .validation(StaticValidationKey::new("7f3a..."))
///     .build()?;
///
/// let outcome = client.send(&command).await?;
/// ```
#[derive(Clone)]
pub struct EditTableClient {
    inner: Arc<EditTableClientInner>,
}

struct EditTableClientInner {
    base_url: Url,
    endpoint: Url,
    config: EditConfig,
    validation: Arc<dyn ValidationKeyProvider>,
    transport: Arc<dyn Transport>,
}

impl EditTableClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> EditTableClientBuilder<Missing, Missing> {
        EditTableClientBuilder::new()
    }

    /// Returns the wiki base URL.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Returns the default save endpoint.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint.as_str()
    }

    pub fn config(&self) -> &EditConfig {
        &self.inner.config
    }

    /// Where `command` is posted: the table's own save URL if it names one,
    /// resolved against the wiki base, otherwise the default endpoint.
    pub fn endpoint_for(&self, command: &Command) -> Result<Url, ApiError> {
        match &command.table().save_url {
            Some(url) => self
                .inner
                .base_url
                .join(url)
                .map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}"))),
            None => Ok(self.inner.endpoint.clone()),
        }
    }

    /// Sends one command and interprets the response.
    ///
    /// A non-success status is an error; a success status is either the
    /// sentinel-prefixed replacement markup or a login prompt. Nothing is
    /// retried.
    pub async fn send(&self, command: &Command) -> Result<SaveOutcome, Error> {
        let url = self.endpoint_for(command)?;
        let key = self.inner.validation.validation_key().await;
        let fields = command.form_fields(key.as_ref().map(|k| k.value.as_str()));

        log::debug!(
            "posting {} for table {} of {} to {url}",
            command.action(),
            command.table().table,
            command.table().topic
        );

        let response = self
            .inner
            .transport
            .post_form(url.as_str(), &fields, self.inner.config.timeout())
            .await?;

        if let Some(next) = response.validation_key.clone() {
            self.inner.validation.rotate(next).await;
        }

        if !response.is_success() {
            log::warn!("{} failed with HTTP {}", command.action(), response.status);
            return Err(Error::Api(ApiError::http(response.status, response.body)));
        }

        let outcome = SaveOutcome::from_body(&response.body, &self.inner.config.response_marker);
        log::trace!(
            "{} answered {}",
            command.action(),
            if outcome.is_applied() { "with a fragment" } else { "with a login prompt" }
        );
        Ok(outcome)
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`EditTableClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The wiki base URL
/// - `validation` - A [`ValidationKeyProvider`] implementation
pub struct EditTableClientBuilder<U, V> {
    url: U,
    validation: V,
    config: EditConfig,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    transport: Option<Arc<dyn Transport>>,
}

impl EditTableClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            validation: Missing,
            config: EditConfig::default(),
            connect_timeout: None,
            http_client: None,
            transport: None,
        }
    }
}

impl Default for EditTableClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EditTableClientBuilder<Missing, V> {
    /// Sets the wiki base URL, e.g. `https://wiki.example.org`.
    pub fn url(self, url: impl Into<String>) -> EditTableClientBuilder<Set<String>, V> {
        EditTableClientBuilder {
            url: Set(url.into()),
            validation: self.validation,
            config: self.config,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            transport: self.transport,
        }
    }
}

impl<U> EditTableClientBuilder<U, Missing> {
    /// Sets the validation key provider.
    pub fn validation<P: ValidationKeyProvider + 'static>(
        self,
        provider: P,
    ) -> EditTableClientBuilder<U, Set<Arc<dyn ValidationKeyProvider>>> {
        self.shared_validation(Arc::new(provider))
    }

    /// Sets a validation key provider that is also held elsewhere.
    pub fn shared_validation(
        self,
        provider: Arc<dyn ValidationKeyProvider>,
    ) -> EditTableClientBuilder<U, Set<Arc<dyn ValidationKeyProvider>>> {
        EditTableClientBuilder {
            url: self.url,
            validation: Set(provider),
            config: self.config,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            transport: self.transport,
        }
    }
}

impl<U, V> EditTableClientBuilder<U, V> {
    /// Sets the editor configuration.
    pub fn config(mut self, config: EditConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the default HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client for the default transport.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the HTTP transport altogether.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

impl EditTableClientBuilder<Set<String>, Set<Arc<dyn ValidationKeyProvider>>> {
    /// Builds the [`EditTableClient`].
    ///
    /// This method is only available when both `url` and `validation` have been set.
    pub fn build(self) -> Result<EditTableClient, Error> {
        let raw = self.url.0;
        let base_url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        let endpoint = base_url
            .join(&self.config.save_path())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.config.save_path())))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http_client = match self.http_client {
                    Some(client) => client,
                    None => {
                        let mut builder = Client::builder();
                        if let Some(timeout) = self.connect_timeout {
                            builder = builder.connect_timeout(timeout);
                        }
                        builder.build().map_err(ApiError::from)?
                    }
                };
                Arc::new(HttpTransport::new(http_client)) as Arc<dyn Transport>
            }
        };

        Ok(EditTableClient {
            inner: Arc::new(EditTableClientInner {
                base_url,
                endpoint,
                config: self.config,
                validation: self.validation.0,
                transport,
            }),
        })
    }
}
