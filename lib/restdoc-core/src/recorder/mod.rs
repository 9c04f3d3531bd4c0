use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

pub(crate) mod body;
mod error;
mod response;

pub use self::error::ApiDocError;
pub use self::response::RecordedResponse;

/// A documentation run: the document under construction plus the HTTP client
/// used to execute the recorded requests.
///
/// `ApiDoc` owns its domains, and domains own their calls; recording goes
/// through `&mut self`, so a document is driven by a single recording task at
/// a time. Domains render in insertion order.
///
/// # Example
///
/// ```rust,no_run
/// use restdoc_core::ApiDoc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut doc = ApiDoc::new("Pet Store", "Reference documentation for the pet store API");
/// doc.add_domain("Pets", "Everything about pets");
///
/// let client = reqwest::Client::new();
/// let request = client.get("http://localhost:8080/pets").build()?;
/// let response = doc.record_call("Pets", "List all pets", request).await?;
/// assert_eq!(response.status(), 200);
///
/// doc.write_markdown_file()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiDoc {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) domains: IndexMap<String, Domain>,
    pub(crate) markdown_file_name: String,
    pub(crate) html_file_name: String,
    client: reqwest::Client,
}

/// A named grouping of related calls (e.g. "Users", "Orders").
#[derive(Debug, Clone)]
pub struct Domain {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) calls: Vec<Call>,
}

/// One recorded request/response exchange. Immutable once appended to its
/// domain.
#[derive(Debug, Clone)]
pub struct Call {
    pub(crate) description: String,
    pub(crate) method: String,
    pub(crate) url: String,
    pub(crate) request_body: String,
    pub(crate) response_code: u16,
    pub(crate) response_body: String,
}

impl ApiDoc {
    /// Creates a new document with the given title and description and the
    /// default output file names (`README.md` and `api.html`).
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            generated_at: Utc::now(),
            domains: IndexMap::new(),
            markdown_file_name: "README.md".to_string(),
            html_file_name: "api.html".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Replaces the shared HTTP client used to execute recorded requests.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Overrides the Markdown output name; `.md` is appended to the given
    /// stem.
    // TODO: skip the suffix when the name already carries an extension
    pub fn set_markdown_file_name(&mut self, name: &str) {
        self.markdown_file_name = format!("{name}.md");
    }

    /// Overrides the HTML output name; `.html` is appended to the given stem.
    pub fn set_html_file_name(&mut self, name: &str) {
        self.html_file_name = format!("{name}.html");
    }

    /// Registers a domain with a description.
    ///
    /// Re-registering an existing domain updates its description and keeps
    /// its position and recorded calls.
    pub fn add_domain(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let name = name.into();
        let domain = self
            .domains
            .entry(name.clone())
            .or_insert_with(|| Domain::new(name));
        domain.description = description.into();
    }

    /// Executes `request` through the shared client and records the exchange
    /// under the domain named `domain`, creating it (with an empty
    /// description) on first use.
    ///
    /// The recorded URL is the request path, plus `?` and the raw query
    /// string when one is present. Buffered request bodies are captured as
    /// text — a field/file summary for multipart forms, pretty-printed JSON
    /// when the bytes parse as JSON, the raw text otherwise.
    ///
    /// Transport and body-read errors are propagated unmodified and the call
    /// is not recorded. On success the returned [`RecordedResponse`] holds
    /// its own buffered body, fully readable regardless of what was recorded.
    pub async fn record_call(
        &mut self,
        domain: &str,
        description: &str,
        request: reqwest::Request,
    ) -> Result<RecordedResponse, ApiDocError> {
        let method = request.method().to_string();
        let mut url = request.url().path().to_string();
        if let Some(query) = request.url().query() {
            url.push('?');
            url.push_str(query);
        }

        let request_body = body::capture_request_body(&request).await;

        debug!(%method, %url, "sending...");
        let response = self.client.execute(request).await?;
        debug!(status = %response.status(), "...received");

        let (response, recorded) = RecordedResponse::drain(response).await?;

        let call = Call {
            description: description.to_string(),
            method,
            url,
            request_body,
            response_code: response.status().as_u16(),
            response_body: body::format_text_body(&recorded),
        };
        self.domain_mut(domain).calls.push(call);

        Ok(response)
    }

    /// The document title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The document description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When this documentation run was created.
    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Looks up a domain by name.
    #[must_use]
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.get(name)
    }

    /// The recorded domains, in insertion order.
    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.domains.values()
    }

    fn domain_mut(&mut self, name: &str) -> &mut Domain {
        self.domains
            .entry(name.to_string())
            .or_insert_with(|| Domain::new(name.to_string()))
    }
}

impl Domain {
    fn new(name: String) -> Self {
        Self {
            name,
            description: String::new(),
            calls: Vec::new(),
        }
    }

    /// The domain name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The domain description; empty when the domain was auto-created by a
    /// recorded call.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The recorded calls, in call order.
    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }
}

impl Call {
    /// The documentation description supplied when recording.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The HTTP method of the recorded request.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The recorded URL: path plus `?` and the raw query when present.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The recorded request body text; empty for absent bodies.
    #[must_use]
    pub fn request_body(&self) -> &str {
        &self.request_body
    }

    /// The response status code.
    #[must_use]
    pub fn response_code(&self) -> u16 {
        self.response_code
    }

    /// The recorded response body text.
    #[must_use]
    pub fn response_body(&self) -> &str {
        &self.response_body
    }
}
