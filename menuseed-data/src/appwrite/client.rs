//! [`DocumentStore`] backed by the Appwrite Databases REST API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{
    Client, Response, StatusCode,
    header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue},
};
use thiserror::Error;
use url::Url;

use menuseed_core::{
    Attributes, CollectionId, DatabaseId, Document, DocumentId, DocumentStore, NewDocumentId,
    StoreError,
};

use super::wire::{
    CreateDocumentRequest, DocumentList, ErrorBody, decode_document, limit_query, offset_query,
};

/// Default user agent for Appwrite requests.
pub const DEFAULT_USER_AGENT: &str = "menuseed/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Documents requested per list page.
pub const PAGE_SIZE: u64 = 100;

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";

/// Failure to construct an [`AppwriteStore`].
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The endpoint is not an absolute http(s) URL.
    #[error("invalid Appwrite endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// Endpoint as supplied.
        endpoint: String,
        /// What is wrong with it.
        reason: String,
    },
    /// A credential contains bytes that cannot be sent as a header.
    #[error("value for header {header} is not a valid header value")]
    InvalidHeader {
        /// Offending header.
        header: &'static str,
        /// Underlying error.
        #[source]
        source: InvalidHeaderValue,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Connection settings for [`AppwriteStore`].
#[derive(Clone)]
pub struct AppwriteConfig {
    /// API root, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    /// Project the database belongs to.
    pub project: String,
    /// Server API key with document read/write scope.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for AppwriteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteConfig")
            .field("endpoint", &self.endpoint)
            .field("project", &self.project)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl AppwriteConfig {
    /// Configuration with the default timeout and user agent.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        project: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            project: project.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Which call a failed response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Create,
    Delete,
}

/// Appwrite-backed document store.
///
/// Every request carries the project and API key headers. Listing pages
/// through the collection [`PAGE_SIZE`] documents at a time until the
/// reported total has been fetched.
#[derive(Debug)]
pub struct AppwriteStore {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl AppwriteStore {
    /// Build a store client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the endpoint is not an absolute
    /// http(s) URL, a credential is not a valid header value, or the HTTP
    /// client cannot be built.
    pub fn new(config: &AppwriteConfig) -> Result<Self, ClientBuildError> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            header_value(PROJECT_HEADER, &config.project, false)?,
        );
        headers.insert(
            HeaderName::from_static(KEY_HEADER),
            header_value(KEY_HEADER, &config.api_key, true)?,
        );
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
        })
    }

    /// `{endpoint}/databases/{database}/collections/{collection}/documents`.
    fn documents_url(&self, database: &DatabaseId, collection: &CollectionId) -> Url {
        let path: [&str; 5] = ["databases", database, "collections", collection, "documents"];
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        url
    }

    fn document_url(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Url {
        let mut url = self.documents_url(database, collection);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    fn page_url(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        offset: u64,
    ) -> Url {
        let mut url = self.documents_url(database, collection);
        url.query_pairs_mut()
            .append_pair("queries[]", &limit_query(PAGE_SIZE))
            .append_pair("queries[]", &offset_query(offset));
        url
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> StoreError {
        if error.is_timeout() {
            return StoreError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            };
        }
        if error.is_decode() {
            return StoreError::Decode {
                url: url.to_string(),
                message: error.to_string(),
            };
        }
        StoreError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    /// Pass successful responses through; turn the rest into [`StoreError`].
    async fn check_status(
        &self,
        response: Response,
        url: &Url,
        operation: Operation,
        collection: &CollectionId,
        id: Option<&DocumentId>,
    ) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        Err(classify_failure(
            operation, status, url, collection, id, &body,
        ))
    }

    async fn fetch_page(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        offset: u64,
    ) -> Result<DocumentList, StoreError> {
        let url = self.page_url(database, collection, offset);
        let sent = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        self.check_status(sent, &url, Operation::List, collection, None)
            .await?
            .json()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))
    }
}

#[async_trait(?Send)]
impl DocumentStore for AppwriteStore {
    async fn list_documents(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
    ) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut offset = 0_u64;
        loop {
            let page = self.fetch_page(database, collection, offset).await?;
            let fetched = page.documents.len() as u64;
            for raw in page.documents {
                let document = decode_document(raw).ok_or_else(|| StoreError::Decode {
                    url: self.documents_url(database, collection).to_string(),
                    message: "document without a string $id".to_owned(),
                })?;
                documents.push(document);
            }
            offset += fetched;
            if fetched == 0 || offset >= page.total {
                break;
            }
        }
        debug!("listed {} documents from {collection}", documents.len());
        Ok(documents)
    }

    async fn create_document(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        id: NewDocumentId,
        attributes: Attributes,
    ) -> Result<Document, StoreError> {
        let url = self.documents_url(database, collection);
        let request = CreateDocumentRequest {
            document_id: id.as_str(),
            data: &attributes,
        };
        let sent = self
            .client
            .post(url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let raw = self
            .check_status(sent, &url, Operation::Create, collection, None)
            .await?
            .json()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        decode_document(raw).ok_or_else(|| StoreError::Decode {
            url: url.to_string(),
            message: "created document without a string $id".to_owned(),
        })
    }

    async fn delete_document(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        id: &DocumentId,
    ) -> Result<(), StoreError> {
        let url = self.document_url(database, collection, id);
        let response = self
            .client
            .delete(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        self.check_status(response, &url, Operation::Delete, collection, Some(id))
            .await?;
        Ok(())
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ClientBuildError> {
    let invalid = |reason: String| ClientBuildError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason,
    };
    let url = Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("endpoint cannot carry a path".to_owned()));
    }
    Ok(url)
}

fn header_value(
    header: &'static str,
    value: &str,
    sensitive: bool,
) -> Result<HeaderValue, ClientBuildError> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|source| ClientBuildError::InvalidHeader { header, source })?;
    value.set_sensitive(sensitive);
    Ok(value)
}

/// Map a non-success response onto the store error taxonomy.
///
/// Client errors on create mean the document itself was refused; a 404 on
/// delete means the document is already gone. Everything else is reported
/// as a plain HTTP failure.
fn classify_failure(
    operation: Operation,
    status: StatusCode,
    url: &Url,
    collection: &CollectionId,
    id: Option<&DocumentId>,
    body: &str,
) -> StoreError {
    let message = ErrorBody::describe(body);
    match (operation, id) {
        (Operation::Create, _) if status.is_client_error() && !is_auth_failure(status) => {
            StoreError::Rejected {
                collection: collection.clone(),
                message,
            }
        }
        (Operation::Delete, Some(id)) if status == StatusCode::NOT_FOUND => StoreError::NotFound {
            collection: collection.clone(),
            id: id.clone(),
        },
        _ => StoreError::Http {
            url: url.to_string(),
            status: status.as_u16(),
            message,
        },
    }
}

fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}
