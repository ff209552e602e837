//! MCP tool implementations.
//!
//! Each tool validates its parameters, makes exactly one [`JiraApi`] call
//! and renders the result as plain text. Failures are returned as-is; there
//! is no retry.

use crate::client::JiraApi;
use crate::domain::{IssueUpdate, NewIssue, NewWorklog, SearchRequest};
use crate::error::{Error, Result};
use crate::format::{
    format_comments, format_issue, format_projects, format_search, format_transitions,
    format_user,
};
use crate::models::{
    AddCommentParams, AddWorklogParams, AssignIssueParams, CreateIssueParams, DEFAULT_ISSUE_TYPE,
    GetCommentsParams, ListProjectsParams, SearchParams, TransitionIssueParams,
    UpdateIssueParams, clean_labels, non_blank, parse_issue_key, parse_max_results,
    parse_started, require_non_blank,
};
use jira_adf::encode;
use std::sync::Arc;
use tracing::debug;

/// Tool implementations for the Jira MCP server.
pub struct Tools {
    client: Arc<dyn JiraApi>,
}

impl Tools {
    /// Create a new Tools instance over the given client.
    pub fn new(client: Arc<dyn JiraApi>) -> Self {
        Self { client }
    }

    /// Describe the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn whoami(&self) -> Result<String> {
        let user = self.client.myself().await?;
        Ok(format_user(&user))
    }

    /// List visible projects.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_results` is out of range or the request fails.
    pub async fn list_projects(&self, params: ListProjectsParams) -> Result<String> {
        let max_results = parse_max_results(params.max_results)?;
        let page = self
            .client
            .list_projects(params.start_at.unwrap_or(0), max_results)
            .await?;
        Ok(format_projects(&page))
    }

    /// Run a JQL search.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is blank, `max_results` is out of range,
    /// or the request fails.
    pub async fn search(&self, params: SearchParams) -> Result<String> {
        let jql = require_non_blank("jql", &params.jql)?;
        let max_results = parse_max_results(params.max_results)?;
        debug!(%jql, max_results, "Searching issues");

        let request = SearchRequest::new(jql, max_results, non_blank(params.next_page_token));
        let results = self.client.search_issues(&request).await?;
        Ok(format_search(&results))
    }

    /// Show one issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed or the request fails.
    pub async fn get_issue(&self, issue_key: &str) -> Result<String> {
        let key = parse_issue_key(issue_key)?;
        let issue = self.client.get_issue(&key).await?;
        Ok(format_issue(&issue))
    }

    /// Create an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the project or summary is blank or the request fails.
    pub async fn create_issue(&self, params: CreateIssueParams) -> Result<String> {
        let issue = NewIssue {
            project_key: require_non_blank("project_key", &params.project_key)?
                .to_ascii_uppercase(),
            summary: require_non_blank("summary", &params.summary)?,
            issue_type: non_blank(params.issue_type)
                .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
            description: params.description.as_deref().map(encode),
            priority: non_blank(params.priority),
            labels: clean_labels(params.labels.unwrap_or_default()),
            assignee_account_id: non_blank(params.assignee_account_id),
        };

        let created = self.client.create_issue(&issue).await?;
        Ok(format!("Created {}", created.key))
    }

    /// Change summary, description, priority or labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed, nothing would change, or the
    /// request fails.
    pub async fn update_issue(&self, params: UpdateIssueParams) -> Result<String> {
        let key = parse_issue_key(&params.issue_key)?;
        let summary = params
            .summary
            .as_deref()
            .map(|s| require_non_blank("summary", s))
            .transpose()?;
        let update = IssueUpdate {
            summary,
            description: params.description.as_deref().map(encode),
            priority: non_blank(params.priority),
            labels: params.labels.map(clean_labels),
        };

        if update.is_empty() {
            return Err(Error::InvalidArgument {
                field: "fields",
                value: key,
                reason: "Provide at least one of summary, description, priority or labels.",
            });
        }

        self.client.update_issue(&key, &update).await?;
        Ok(format!("Updated {key}"))
    }

    /// Assign or unassign an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed or the request fails.
    pub async fn assign_issue(&self, params: AssignIssueParams) -> Result<String> {
        let key = parse_issue_key(&params.issue_key)?;
        let account_id = non_blank(params.account_id);

        self.client
            .assign_issue(&key, account_id.as_deref())
            .await?;
        Ok(match account_id {
            Some(account_id) => format!("Assigned {key} to {account_id}"),
            None => format!("Unassigned {key}"),
        })
    }

    /// Read comments on an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed, `max_results` is out of
    /// range, or the request fails.
    pub async fn get_comments(&self, params: GetCommentsParams) -> Result<String> {
        let key = parse_issue_key(&params.issue_key)?;
        let max_results = parse_max_results(params.max_results)?;
        let page = self.client.get_comments(&key, max_results).await?;
        Ok(format_comments(&page.comments))
    }

    /// Add a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed, the body is blank, or the
    /// request fails.
    pub async fn add_comment(&self, params: AddCommentParams) -> Result<String> {
        let key = parse_issue_key(&params.issue_key)?;
        require_non_blank("body", &params.body)?;

        let comment = self.client.add_comment(&key, &encode(&params.body)).await?;
        Ok(format!(
            "Added comment {} to {key}",
            comment.id.as_deref().unwrap_or("?")
        ))
    }

    /// List transitions available on an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed or the request fails.
    pub async fn get_transitions(&self, issue_key: &str) -> Result<String> {
        let key = parse_issue_key(issue_key)?;
        let transitions = self.client.get_transitions(&key).await?;
        Ok(format_transitions(&transitions))
    }

    /// Move an issue through its workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or transition id is invalid or the
    /// request fails.
    pub async fn transition_issue(&self, params: TransitionIssueParams) -> Result<String> {
        let key = parse_issue_key(&params.issue_key)?;
        let transition_id = require_non_blank("transition_id", &params.transition_id)?;

        self.client.transition_issue(&key, &transition_id).await?;
        Ok(format!("Transitioned {key} (transition {transition_id})"))
    }

    /// Log time on an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the key, time or start timestamp is invalid or the
    /// request fails.
    pub async fn add_worklog(&self, params: AddWorklogParams) -> Result<String> {
        let key = parse_issue_key(&params.issue_key)?;
        let worklog = NewWorklog {
            time_spent: require_non_blank("time_spent", &params.time_spent)?,
            started: non_blank(params.started)
                .map(|s| parse_started(&s))
                .transpose()?,
            comment: params
                .comment
                .filter(|c| !c.trim().is_empty())
                .map(|c| encode(&c)),
        };

        self.client.add_worklog(&key, &worklog).await?;
        Ok(format!("Logged {} on {key}", worklog.time_spent))
    }
}
