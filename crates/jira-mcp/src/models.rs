//! MCP tool parameter models.
//!
//! These types describe the JSON arguments of each tool; their doc comments
//! become the field descriptions in the published JSON schema. The parsing
//! helpers at the bottom validate values before any request is made.

use crate::error::{Error, Result};
use chrono::DateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Page size when a tool caller does not ask for one.
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Largest page size a tool caller may ask for.
pub const MAX_RESULTS_LIMIT: u32 = 100;

/// Issue type used by `jira_create_issue` when none is given.
pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Timestamp format Jira expects for worklog `started`.
pub const JIRA_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Parameters for the `jira_list_projects` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListProjectsParams {
    /// Index of the first project to return (default 0).
    pub start_at: Option<u32>,

    /// Maximum projects to return, 1-100 (default 20).
    pub max_results: Option<u32>,
}

/// Parameters for the `jira_search` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// JQL query, e.g. `project = PROJ AND status = "In Progress"`.
    pub jql: String,

    /// Maximum issues to return, 1-100 (default 20).
    pub max_results: Option<u32>,

    /// `next_page_token` from a previous search to fetch the following page.
    pub next_page_token: Option<String>,
}

/// Parameters for tools that act on a single issue.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IssueKeyParams {
    /// Issue key, e.g. `PROJ-123`.
    pub issue_key: String,
}

/// Parameters for the `jira_create_issue` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueParams {
    /// Key of the project to create the issue in.
    pub project_key: String,

    /// One-line summary.
    pub summary: String,

    /// Issue type name (default "Task").
    pub issue_type: Option<String>,

    /// Plain-text description. Blank lines separate paragraphs.
    pub description: Option<String>,

    /// Priority name, e.g. "High".
    pub priority: Option<String>,

    /// Labels to set.
    pub labels: Option<Vec<String>>,

    /// Account id of the assignee.
    pub assignee_account_id: Option<String>,
}

/// Parameters for the `jira_update_issue` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIssueParams {
    /// Issue key, e.g. `PROJ-123`.
    pub issue_key: String,

    /// New summary.
    pub summary: Option<String>,

    /// New plain-text description. Replaces the existing one.
    pub description: Option<String>,

    /// New priority name.
    pub priority: Option<String>,

    /// Replacement labels. An empty list clears all labels.
    pub labels: Option<Vec<String>>,
}

/// Parameters for the `jira_assign_issue` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssignIssueParams {
    /// Issue key, e.g. `PROJ-123`.
    pub issue_key: String,

    /// Account id of the new assignee. Omit to unassign.
    pub account_id: Option<String>,
}

/// Parameters for the `jira_get_comments` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetCommentsParams {
    /// Issue key, e.g. `PROJ-123`.
    pub issue_key: String,

    /// Maximum comments to return, 1-100 (default 20).
    pub max_results: Option<u32>,
}

/// Parameters for the `jira_add_comment` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddCommentParams {
    /// Issue key, e.g. `PROJ-123`.
    pub issue_key: String,

    /// Plain-text comment. Blank lines separate paragraphs.
    pub body: String,
}

/// Parameters for the `jira_transition_issue` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TransitionIssueParams {
    /// Issue key, e.g. `PROJ-123`.
    pub issue_key: String,

    /// Transition id from `jira_get_transitions`.
    pub transition_id: String,
}

/// Parameters for the `jira_add_worklog` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddWorklogParams {
    /// Issue key, e.g. `PROJ-123`.
    pub issue_key: String,

    /// Time spent in Jira duration syntax, e.g. "1h 30m".
    pub time_spent: String,

    /// Optional plain-text note.
    pub comment: Option<String>,

    /// When the work started, RFC 3339 (e.g. 2024-01-31T09:00:00Z). Defaults to now.
    pub started: Option<String>,
}

/// Require a non-blank string and return it trimmed.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the value is empty or whitespace.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument {
            field,
            value: value.to_string(),
            reason: "Must not be empty.",
        });
    }
    Ok(trimmed.to_string())
}

/// Validate an issue key (`PROJ-123`) or numeric issue id.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for anything else.
pub fn parse_issue_key(value: &str) -> Result<String> {
    let key = value.trim();
    let valid = if key.bytes().all(|b| b.is_ascii_digit()) {
        !key.is_empty()
    } else {
        key.rsplit_once('-').is_some_and(|(project, number)| {
            project.starts_with(|c: char| c.is_ascii_alphabetic())
                && project
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !number.is_empty()
                && number.bytes().all(|b| b.is_ascii_digit())
        })
    };

    if valid {
        Ok(key.to_ascii_uppercase())
    } else {
        Err(Error::InvalidArgument {
            field: "issue_key",
            value: value.to_string(),
            reason: "Expected an issue key like PROJ-123 or a numeric issue id.",
        })
    }
}

/// Apply the default page size and check the limit.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the value is 0 or above
/// [`MAX_RESULTS_LIMIT`].
pub fn parse_max_results(value: Option<u32>) -> Result<u32> {
    match value {
        None => Ok(DEFAULT_MAX_RESULTS),
        Some(n) if (1..=MAX_RESULTS_LIMIT).contains(&n) => Ok(n),
        Some(n) => Err(Error::InvalidArgument {
            field: "max_results",
            value: n.to_string(),
            reason: "Must be between 1 and 100.",
        }),
    }
}

/// Convert an RFC 3339 timestamp to the form Jira's worklog API accepts.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the value is not RFC 3339.
pub fn parse_started(value: &str) -> Result<String> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.format(JIRA_DATETIME_FORMAT).to_string())
        .map_err(|_| Error::InvalidArgument {
            field: "started",
            value: value.to_string(),
            reason: "Expected an RFC 3339 timestamp like 2024-01-31T09:00:00Z.",
        })
}

/// Trim labels and drop blank ones.
#[must_use]
pub fn clean_labels(labels: Vec<String>) -> Vec<String> {
    labels
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Treat a blank optional string as absent.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("PROJ-123", "PROJ-123")]
    #[case::lowercase("proj-1", "PROJ-1")]
    #[case::digits_in_project("AB2-9", "AB2-9")]
    #[case::underscore("MY_PROJ-42", "MY_PROJ-42")]
    #[case::padded("  PROJ-7 ", "PROJ-7")]
    #[case::numeric_id("10001", "10001")]
    fn test_parse_issue_key_valid(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_issue_key(input).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::no_number("PROJ-")]
    #[case::no_project("-123")]
    #[case::no_dash("PROJ123")]
    #[case::leading_digit("1PROJ-2")]
    #[case::path_traversal("../PROJ-1")]
    #[case::query("PROJ-1?expand=all")]
    fn test_parse_issue_key_invalid(#[case] input: &str) {
        assert!(matches!(
            parse_issue_key(input),
            Err(Error::InvalidArgument {
                field: "issue_key",
                ..
            })
        ));
    }

    #[rstest]
    #[case::default(None, Some(DEFAULT_MAX_RESULTS))]
    #[case::min(Some(1), Some(1))]
    #[case::max(Some(100), Some(100))]
    #[case::zero(Some(0), None)]
    #[case::too_many(Some(101), None)]
    fn test_parse_max_results(#[case] input: Option<u32>, #[case] expected: Option<u32>) {
        assert_eq!(parse_max_results(input).ok(), expected);
    }

    #[rstest]
    #[case::utc("2024-01-31T09:00:00Z", "2024-01-31T09:00:00.000+0000")]
    #[case::offset("2024-01-31T09:00:00.5+02:00", "2024-01-31T09:00:00.500+0200")]
    fn test_parse_started(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_started(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_started_rejects_garbage() {
        assert!(parse_started("yesterday").is_err());
    }

    #[test]
    fn test_require_non_blank() {
        assert_eq!(require_non_blank("summary", " x ").unwrap(), "x");
        assert!(require_non_blank("summary", "   ").is_err());
    }

    #[test]
    fn test_clean_labels() {
        let labels = vec![" a ".to_string(), String::new(), "b".to_string()];
        assert_eq!(clean_labels(labels), vec!["a", "b"]);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" High ".to_string())), Some("High".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
