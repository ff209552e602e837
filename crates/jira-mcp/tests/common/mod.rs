//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use jira_adf::Document;
use jira_mcp::domain::{
    Comment, CommentPage, CreatedIssue, Issue, IssueUpdate, NewIssue, NewWorklog, ProjectPage,
    SearchRequest, SearchResults, Transition, User, Worklog,
};
use jira_mcp::{Error, JiraApi, Result};
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A call received by [`MockJira`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Myself,
    ListProjects { start_at: u32, max_results: u32 },
    Search(SearchRequest),
    GetIssue(String),
    CreateIssue(NewIssue),
    UpdateIssue(String, IssueUpdate),
    Assign(String, Option<String>),
    GetComments(String, u32),
    AddComment(String, Document),
    GetTransitions(String),
    Transition(String, String),
    AddWorklog(String, NewWorklog),
}

/// In-memory [`JiraApi`] that records calls and returns canned responses.
#[derive(Default)]
pub struct MockJira {
    pub calls: Mutex<Vec<Call>>,
    pub user: User,
    pub projects: ProjectPage,
    pub search: SearchResults,
    pub issue: Issue,
    pub comments: CommentPage,
    pub transitions: Vec<Transition>,
    /// When set, every call fails with this status and message.
    pub failure: Option<(u16, &'static str)>,
}

impl MockJira {
    /// A mock whose every call fails with the given status.
    pub fn failing(status: u16, message: &'static str) -> Self {
        Self {
            failure: Some((status, message)),
            ..Default::default()
        }
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some((status, message)) => Err(Error::Api {
                status,
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl JiraApi for MockJira {
    async fn myself(&self) -> Result<User> {
        self.record(Call::Myself)?;
        Ok(self.user.clone())
    }

    async fn list_projects(&self, start_at: u32, max_results: u32) -> Result<ProjectPage> {
        self.record(Call::ListProjects {
            start_at,
            max_results,
        })?;
        Ok(self.projects.clone())
    }

    async fn search_issues(&self, request: &SearchRequest) -> Result<SearchResults> {
        self.record(Call::Search(request.clone()))?;
        Ok(self.search.clone())
    }

    async fn get_issue(&self, key: &str) -> Result<Issue> {
        self.record(Call::GetIssue(key.to_string()))?;
        Ok(self.issue.clone())
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        self.record(Call::CreateIssue(issue.clone()))?;
        Ok(CreatedIssue {
            id: "10001".to_string(),
            key: format!("{}-1", issue.project_key),
        })
    }

    async fn update_issue(&self, key: &str, update: &IssueUpdate) -> Result<()> {
        self.record(Call::UpdateIssue(key.to_string(), update.clone()))
    }

    async fn assign_issue(&self, key: &str, account_id: Option<&str>) -> Result<()> {
        self.record(Call::Assign(key.to_string(), account_id.map(str::to_string)))
    }

    async fn get_comments(&self, key: &str, max_results: u32) -> Result<CommentPage> {
        self.record(Call::GetComments(key.to_string(), max_results))?;
        Ok(self.comments.clone())
    }

    async fn add_comment(&self, key: &str, body: &Document) -> Result<Comment> {
        self.record(Call::AddComment(key.to_string(), body.clone()))?;
        Ok(Comment {
            id: Some("20001".to_string()),
            ..Default::default()
        })
    }

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        self.record(Call::GetTransitions(key.to_string()))?;
        Ok(self.transitions.clone())
    }

    async fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()> {
        self.record(Call::Transition(
            key.to_string(),
            transition_id.to_string(),
        ))
    }

    async fn add_worklog(&self, key: &str, worklog: &NewWorklog) -> Result<Worklog> {
        self.record(Call::AddWorklog(key.to_string(), worklog.clone()))?;
        Ok(Worklog {
            id: Some("30001".to_string()),
            time_spent: Some(worklog.time_spent.clone()),
            time_spent_seconds: None,
        })
    }
}

/// A request captured by [`serve_once`].
#[derive(Debug)]
pub struct CapturedRequest {
    /// Request line and headers, as received.
    pub head: String,
    /// Request body.
    pub body: String,
}

impl CapturedRequest {
    /// The request line, e.g. `GET /rest/api/3/myself HTTP/1.1`.
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// Value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }
}

/// Serve a single HTTP response on a local port.
///
/// Returns the base URL to point a client at and a handle resolving to the
/// captured request.
pub async fn serve_once(
    status: u16,
    body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        let body_start = header_end + 4;
        while buf.len() < body_start + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body was complete");
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body =
            String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string();

        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        CapturedRequest {
            head,
            body: request_body,
        }
    });

    (format!("http://{addr}"), handle)
}
