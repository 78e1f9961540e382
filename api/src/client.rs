use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::types::{
    ContentStats, FilterAck, SearchRequest, SourceSelection, SummaryStats, TimeStats, UploadFile,
    UploadReceipt, UserStats,
};

/// Where the backend listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Every backend route this client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Summary,
    Time,
    Users,
    Content,
    Search,
    Sources,
    Reset,
    Upload,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Summary => "stats/summary",
            Self::Time => "stats/time",
            Self::Users => "stats/user",
            Self::Content => "stats/content",
            Self::Search => "filter/search",
            Self::Sources => "filter/sources",
            Self::Reset => "filter/reset",
            Self::Upload => "upload",
        }
    }

    /// Short name used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Time => "time",
            Self::Users => "users",
            Self::Content => "content",
            Self::Search => "search",
            Self::Sources => "sources",
            Self::Reset => "reset",
            Self::Upload => "upload",
        }
    }
}

/// Read and mutation calls against the statistics backend.
///
/// Reads return pre-aggregated payloads scoped by whatever filter the backend currently holds;
/// the mutation calls change that filter for every subsequent read.
#[allow(async_fn_in_trait)]
pub trait StatsBackend {
    async fn summary(&self) -> Result<SummaryStats, ApiError>;

    async fn time_stats(&self) -> Result<TimeStats, ApiError>;

    /// Leaderboard, per-user breakdown and the reply adjacency.
    async fn user_stats(&self) -> Result<UserStats, ApiError>;

    async fn content_stats(&self) -> Result<ContentStats, ApiError>;

    async fn search(&self, request: &SearchRequest) -> Result<FilterAck, ApiError>;

    async fn select_sources(&self, selection: &SourceSelection) -> Result<FilterAck, ApiError>;

    async fn reset(&self) -> Result<FilterAck, ApiError>;

    async fn upload(
        &self,
        posts: UploadFile,
        comments: UploadFile,
    ) -> Result<UploadReceipt, ApiError>;
}

/// JSON-over-HTTP backend client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .build()
            .map_err(|err| ApiError::Transport {
                endpoint: "client",
                message: err.to_string(),
            })?;
        Ok(Self {
            base_url: trim_trailing_slash(base_url.into()),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    async fn get_json<R>(&self, endpoint: Endpoint) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| transport(endpoint, err))?;
        decode(endpoint, response).await
    }

    async fn post_json<T, R>(&self, endpoint: Endpoint, body: &T) -> Result<R, ApiError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| transport(endpoint, err))?;
        decode(endpoint, response).await
    }
}

impl StatsBackend for HttpBackend {
    async fn summary(&self) -> Result<SummaryStats, ApiError> {
        self.get_json(Endpoint::Summary).await
    }

    async fn time_stats(&self) -> Result<TimeStats, ApiError> {
        self.get_json(Endpoint::Time).await
    }

    async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.get_json(Endpoint::Users).await
    }

    async fn content_stats(&self) -> Result<ContentStats, ApiError> {
        self.get_json(Endpoint::Content).await
    }

    async fn search(&self, request: &SearchRequest) -> Result<FilterAck, ApiError> {
        self.post_json(Endpoint::Search, request).await
    }

    async fn select_sources(&self, selection: &SourceSelection) -> Result<FilterAck, ApiError> {
        self.post_json(Endpoint::Sources, selection).await
    }

    async fn reset(&self) -> Result<FilterAck, ApiError> {
        self.post_json(Endpoint::Reset, &serde_json::json!({})).await
    }

    async fn upload(
        &self,
        posts: UploadFile,
        comments: UploadFile,
    ) -> Result<UploadReceipt, ApiError> {
        let endpoint = Endpoint::Upload;
        let form = Form::new()
            .part("posts", Part::bytes(posts.bytes).file_name(posts.name))
            .part("comments", Part::bytes(comments.bytes).file_name(comments.name));

        let url = self.url(endpoint);
        debug!(%url, "POST multipart");
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| transport(endpoint, err))?;
        decode(endpoint, response).await
    }
}

fn transport(endpoint: Endpoint, err: reqwest::Error) -> ApiError {
    warn!(endpoint = endpoint.label(), error = %err, "request failed");
    ApiError::Transport {
        endpoint: endpoint.label(),
        message: err.to_string(),
    }
}

async fn decode<R>(endpoint: Endpoint, response: Response) -> Result<R, ApiError>
where
    R: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        warn!(endpoint = endpoint.label(), status = status.as_u16(), "non-success status");
        return Err(ApiError::Status {
            endpoint: endpoint.label(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|err| transport(endpoint, err))?;
    decode_body(endpoint, &body)
}

/// Empty bodies (e.g. a bare 204 from the reset call) decode as an empty object.
fn decode_body<R>(endpoint: Endpoint, body: &str) -> Result<R, ApiError>
where
    R: DeserializeOwned,
{
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|err| ApiError::Decode {
        endpoint: endpoint.label(),
        message: err.to_string(),
    })
}

fn trim_trailing_slash(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let backend = HttpBackend::new("http://localhost:5000//").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(
            backend.url(Endpoint::Summary),
            "http://localhost:5000/stats/summary"
        );
        assert_eq!(backend.url(Endpoint::Reset), "http://localhost:5000/filter/reset");
    }

    #[test]
    fn empty_ack_body_decodes_to_default() {
        let ack: FilterAck = decode_body(Endpoint::Reset, "  ").unwrap();
        assert_eq!(ack, FilterAck::default());

        let ack: FilterAck = decode_body(Endpoint::Search, r#"{"rows": 42, "data": []}"#).unwrap();
        assert_eq!(ack.rows, Some(42));
    }

    #[test]
    fn users_read_carries_the_reply_adjacency() {
        let body = r#"{"top_users": [], "users": [], "interaction_graph": {"zed": {"ann": 2}, "ann": {"ann": 1}}}"#;
        let stats: UserStats = decode_body(Endpoint::Users, body).unwrap();

        let sources: Vec<&str> = stats.interaction_graph.keys().map(String::as_str).collect();
        assert_eq!(sources, ["zed", "ann"]);
        assert_eq!(stats.interaction_graph["ann"]["ann"], 1);
        assert_eq!(Endpoint::Users.path(), "stats/user");
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_body::<TimeStats>(Endpoint::Time, "[1, 2").unwrap_err();
        assert!(matches!(err, ApiError::Decode { endpoint: "time", .. }));
        assert_eq!(err.endpoint(), "time");
    }
}
