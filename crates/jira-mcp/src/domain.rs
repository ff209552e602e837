//! Jira REST payload types.
//!
//! Response types mirror the subset of Jira's JSON that the tools read.
//! Every field Jira may omit is optional and defaults when missing, so a
//! sparse or partially permitted response still deserializes. Rich-text
//! fields stay raw [`Value`]s and are decoded only when formatted.
//!
//! Request types hold already-encoded [`Document`]s and know how to build
//! their JSON bodies.

use jira_adf::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Issue fields requested by `jira_search` when listing results.
pub const SEARCH_FIELDS: &[&str] = &["summary", "status", "issuetype", "priority", "assignee"];

/// A Jira user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Atlassian account id.
    pub account_id: Option<String>,

    /// Name shown in the UI.
    pub display_name: Option<String>,

    /// Email, when visible to the caller.
    pub email_address: Option<String>,

    /// Whether the account is active.
    pub active: Option<bool>,

    /// IANA time zone.
    pub time_zone: Option<String>,
}

/// A named reference such as an issue type, status or priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Named {
    /// Object id.
    pub id: Option<String>,

    /// Display name.
    pub name: Option<String>,
}

/// Issue fields read by the formatters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueFields {
    /// One-line summary.
    pub summary: Option<String>,

    /// Issue type (Bug, Task, ...).
    pub issuetype: Option<Named>,

    /// Workflow status.
    pub status: Option<Named>,

    /// Priority.
    pub priority: Option<Named>,

    /// Assignee, `None` when unassigned.
    pub assignee: Option<User>,

    /// Reporter.
    pub reporter: Option<User>,

    /// Labels.
    pub labels: Vec<String>,

    /// Description as an ADF document.
    pub description: Option<Value>,

    /// Creation timestamp as sent by Jira.
    pub created: Option<String>,

    /// Last update timestamp as sent by Jira.
    pub updated: Option<String>,
}

/// A Jira issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    /// Numeric id.
    pub id: Option<String>,

    /// Issue key, e.g. `PROJ-123`.
    pub key: String,

    /// Field values.
    pub fields: IssueFields,
}

/// One page of JQL search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResults {
    /// Matching issues.
    pub issues: Vec<Issue>,

    /// Token for the next page, passed back verbatim.
    pub next_page_token: Option<String>,

    /// Whether this is the final page.
    pub is_last: Option<bool>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    /// Comment id.
    pub id: Option<String>,

    /// Author.
    pub author: Option<User>,

    /// Body as an ADF document.
    pub body: Option<Value>,

    /// Creation timestamp.
    pub created: Option<String>,

    /// Last update timestamp.
    pub updated: Option<String>,
}

/// One page of comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentPage {
    /// Comments on this page.
    pub comments: Vec<Comment>,

    /// Index of the first comment.
    pub start_at: Option<u64>,

    /// Page size used by the server.
    pub max_results: Option<u64>,

    /// Total comments on the issue.
    pub total: Option<u64>,
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transition {
    /// Transition id, used to perform it.
    pub id: String,

    /// Transition name.
    pub name: Option<String>,

    /// Status the issue moves to.
    pub to: Option<Named>,
}

/// Response of the transitions endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transitions {
    /// Available transitions.
    pub transitions: Vec<Transition>,
}

/// A project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Numeric id.
    pub id: Option<String>,

    /// Project key, e.g. `PROJ`.
    pub key: String,

    /// Display name.
    pub name: Option<String>,

    /// `software`, `service_desk`, `business`.
    pub project_type_key: Option<String>,
}

/// One page of projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPage {
    /// Projects on this page.
    pub values: Vec<Project>,

    /// Index of the first project.
    pub start_at: Option<u64>,

    /// Total projects visible to the caller.
    pub total: Option<u64>,

    /// Whether this is the final page.
    pub is_last: Option<bool>,
}

/// Response of issue creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedIssue {
    /// Numeric id.
    pub id: String,

    /// Issue key.
    pub key: String,
}

/// A worklog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Worklog {
    /// Worklog id.
    pub id: Option<String>,

    /// Logged time as entered, e.g. `1h 30m`.
    pub time_spent: Option<String>,

    /// Logged time in seconds.
    pub time_spent_seconds: Option<u64>,
}

/// Body of a JQL search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// JQL query.
    pub jql: String,

    /// Page size.
    pub max_results: u32,

    /// Fields to return.
    pub fields: Vec<String>,

    /// Token from the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl SearchRequest {
    /// Search with the default result fields.
    pub fn new(jql: impl Into<String>, max_results: u32, next_page_token: Option<String>) -> Self {
        Self {
            jql: jql.into(),
            max_results,
            fields: SEARCH_FIELDS.iter().map(ToString::to_string).collect(),
            next_page_token,
        }
    }
}

/// A new issue.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    /// Key of the project to create in.
    pub project_key: String,

    /// Summary line.
    pub summary: String,

    /// Issue type name.
    pub issue_type: String,

    /// Encoded description.
    pub description: Option<Document>,

    /// Priority name.
    pub priority: Option<String>,

    /// Labels.
    pub labels: Vec<String>,

    /// Assignee account id.
    pub assignee_account_id: Option<String>,
}

impl NewIssue {
    /// Request body for `POST /issue`.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("project".into(), json!({ "key": self.project_key }));
        fields.insert("summary".into(), json!(self.summary));
        fields.insert("issuetype".into(), json!({ "name": self.issue_type }));
        if let Some(description) = &self.description {
            fields.insert("description".into(), Value::from(description.clone()));
        }
        if let Some(priority) = &self.priority {
            fields.insert("priority".into(), json!({ "name": priority }));
        }
        if !self.labels.is_empty() {
            fields.insert("labels".into(), json!(self.labels));
        }
        if let Some(account_id) = &self.assignee_account_id {
            fields.insert("assignee".into(), json!({ "accountId": account_id }));
        }
        json!({ "fields": fields })
    }
}

/// Changes to an existing issue. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueUpdate {
    /// New summary.
    pub summary: Option<String>,

    /// New encoded description.
    pub description: Option<Document>,

    /// New priority name.
    pub priority: Option<String>,

    /// Replacement label set.
    pub labels: Option<Vec<String>>,
}

impl IssueUpdate {
    /// Whether no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.labels.is_none()
    }

    /// Request body for `PUT /issue/{key}`.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut fields = Map::new();
        if let Some(summary) = &self.summary {
            fields.insert("summary".into(), json!(summary));
        }
        if let Some(description) = &self.description {
            fields.insert("description".into(), Value::from(description.clone()));
        }
        if let Some(priority) = &self.priority {
            fields.insert("priority".into(), json!({ "name": priority }));
        }
        if let Some(labels) = &self.labels {
            fields.insert("labels".into(), json!(labels));
        }
        json!({ "fields": fields })
    }
}

/// A worklog to add.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorklog {
    /// Time in Jira duration syntax, e.g. `2h 15m`.
    pub time_spent: String,

    /// Start time in Jira's `2024-01-31T09:00:00.000+0000` form.
    pub started: Option<String>,

    /// Encoded note.
    pub comment: Option<Document>,
}

impl NewWorklog {
    /// Request body for `POST /issue/{key}/worklog`.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("timeSpent".into(), json!(self.time_spent));
        if let Some(started) = &self.started {
            body.insert("started".into(), json!(started));
        }
        if let Some(comment) = &self.comment {
            body.insert("comment".into(), Value::from(comment.clone()));
        }
        Value::Object(body)
    }
}
