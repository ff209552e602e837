//! Jira REST client.
//!
//! [`JiraApi`] is the seam between the tools and the network. Each method
//! maps to exactly one REST call; there is no retrying, caching or paging
//! beyond passing Jira's own page parameters through. [`HttpJiraClient`]
//! implements it over `reqwest`.
//!
//! # Authentication
//!
//! Static credentials only. With an email configured every request carries
//! Basic auth (`email:api_token`, Jira Cloud API tokens); without one the
//! token is sent as a Bearer personal access token (Data Center).

use crate::config::JiraConfig;
use crate::domain::{
    Comment, CommentPage, CreatedIssue, Issue, IssueUpdate, NewIssue, NewWorklog, ProjectPage,
    SearchRequest, SearchResults, Transition, Transitions, User, Worklog,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use jira_adf::Document;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Prefix of every REST v3 path.
pub const API_PREFIX: &str = "/rest/api/3";

/// Operations the tools need from Jira.
///
/// Implementations must be `Send + Sync`; the server shares one instance
/// across concurrent tool calls.
#[async_trait]
pub trait JiraApi: Send + Sync {
    /// The user the credentials belong to.
    async fn myself(&self) -> Result<User>;

    /// One page of visible projects.
    async fn list_projects(&self, start_at: u32, max_results: u32) -> Result<ProjectPage>;

    /// One page of JQL search results.
    async fn search_issues(&self, request: &SearchRequest) -> Result<SearchResults>;

    /// A single issue with all fields.
    async fn get_issue(&self, key: &str) -> Result<Issue>;

    /// Create an issue.
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue>;

    /// Change fields on an issue.
    async fn update_issue(&self, key: &str, update: &IssueUpdate) -> Result<()>;

    /// Assign an issue, or unassign it with `None`.
    async fn assign_issue(&self, key: &str, account_id: Option<&str>) -> Result<()>;

    /// Comments on an issue, oldest first.
    async fn get_comments(&self, key: &str, max_results: u32) -> Result<CommentPage>;

    /// Add a comment.
    async fn add_comment(&self, key: &str, body: &Document) -> Result<Comment>;

    /// Transitions available from the issue's current status.
    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>>;

    /// Perform a transition.
    async fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()>;

    /// Log work on an issue.
    async fn add_worklog(&self, key: &str, worklog: &NewWorklog) -> Result<Worklog>;
}

#[derive(Clone)]
enum Auth {
    Basic { email: String, token: String },
    Bearer(String),
}

/// [`JiraApi`] over HTTP.
#[derive(Clone)]
pub struct HttpJiraClient {
    http: Client,
    base_url: String,
    auth: Auth,
}

impl HttpJiraClient {
    /// Build a client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the TLS backend cannot be initialized.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("jira-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let auth = match &config.email {
            Some(email) => Auth::Basic {
                email: email.clone(),
                token: config.api_token.clone(),
            },
            None => Auth::Bearer(config.api_token.clone()),
        };

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            auth,
        })
    }

    /// The site URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "Jira request");
        let builder = self
            .http
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        match &self.auth {
            Auth::Basic { email, token } => builder.basic_auth(email, Some(token)),
            Auth::Bearer(token) => builder.bearer_auth(token),
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "(no body)".to_string());
        warn!(status = status.as_u16(), "Jira request failed");
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.execute(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.execute(builder).await?;
        Ok(())
    }
}

/// Percent-encode an issue key or id for use as a path segment.
fn segment(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

#[async_trait]
impl JiraApi for HttpJiraClient {
    async fn myself(&self) -> Result<User> {
        self.send_json(self.request(Method::GET, "/myself")).await
    }

    async fn list_projects(&self, start_at: u32, max_results: u32) -> Result<ProjectPage> {
        let path = format!("/project/search?startAt={start_at}&maxResults={max_results}");
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn search_issues(&self, request: &SearchRequest) -> Result<SearchResults> {
        self.send_json(self.request(Method::POST, "/search/jql").json(request))
            .await
    }

    async fn get_issue(&self, key: &str) -> Result<Issue> {
        let path = format!("/issue/{}", segment(key));
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        self.send_json(self.request(Method::POST, "/issue").json(&issue.to_body()))
            .await
    }

    async fn update_issue(&self, key: &str, update: &IssueUpdate) -> Result<()> {
        let path = format!("/issue/{}", segment(key));
        self.send_empty(self.request(Method::PUT, &path).json(&update.to_body()))
            .await
    }

    async fn assign_issue(&self, key: &str, account_id: Option<&str>) -> Result<()> {
        let path = format!("/issue/{}/assignee", segment(key));
        let body = json!({ "accountId": account_id });
        self.send_empty(self.request(Method::PUT, &path).json(&body))
            .await
    }

    async fn get_comments(&self, key: &str, max_results: u32) -> Result<CommentPage> {
        let path = format!("/issue/{}/comment?maxResults={max_results}", segment(key));
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn add_comment(&self, key: &str, body: &Document) -> Result<Comment> {
        let path = format!("/issue/{}/comment", segment(key));
        let body = json!({ "body": Value::from(body.clone()) });
        self.send_json(self.request(Method::POST, &path).json(&body))
            .await
    }

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let path = format!("/issue/{}/transitions", segment(key));
        let transitions: Transitions = self.send_json(self.request(Method::GET, &path)).await?;
        Ok(transitions.transitions)
    }

    async fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()> {
        let path = format!("/issue/{}/transitions", segment(key));
        let body = json!({ "transition": { "id": transition_id } });
        self.send_empty(self.request(Method::POST, &path).json(&body))
            .await
    }

    async fn add_worklog(&self, key: &str, worklog: &NewWorklog) -> Result<Worklog> {
        let path = format!("/issue/{}/worklog", segment(key));
        self.send_json(self.request(Method::POST, &path).json(&worklog.to_body()))
            .await
    }
}
