//! Plain-text rendering of Jira payloads for tool results.
//!
//! Missing optional fields are either skipped or replaced by a placeholder:
//! `?` for type/status/priority, `(no summary)`, `Unknown` for a comment
//! author and `(empty)` for a comment body. Rich-text fields go through
//! [`jira_adf::decode_value`].

use crate::domain::{Comment, Issue, Named, ProjectPage, SearchResults, Transition, User};
use jira_adf::decode_value;
use std::fmt::Write;

const UNKNOWN_FIELD: &str = "?";
const NO_SUMMARY: &str = "(no summary)";
const UNKNOWN_AUTHOR: &str = "Unknown";
const EMPTY_BODY: &str = "(empty)";

fn name_or_unknown(named: Option<&Named>) -> &str {
    named
        .and_then(|n| n.name.as_deref())
        .unwrap_or(UNKNOWN_FIELD)
}

fn display_name(user: Option<&User>) -> Option<&str> {
    user.and_then(|u| u.display_name.as_deref())
}

/// Full issue view for `jira_get_issue`.
#[must_use]
pub fn format_issue(issue: &Issue) -> String {
    let fields = &issue.fields;
    let mut lines = vec![
        format!("Key: {}", issue.key),
        format!(
            "Summary: {}",
            fields.summary.as_deref().unwrap_or(NO_SUMMARY)
        ),
        format!(
            "Type: {} | Status: {} | Priority: {}",
            name_or_unknown(fields.issuetype.as_ref()),
            name_or_unknown(fields.status.as_ref()),
            name_or_unknown(fields.priority.as_ref()),
        ),
    ];

    if let Some(assignee) = display_name(fields.assignee.as_ref()) {
        lines.push(format!("Assignee: {assignee}"));
    }
    if let Some(reporter) = display_name(fields.reporter.as_ref()) {
        lines.push(format!("Reporter: {reporter}"));
    }
    if !fields.labels.is_empty() {
        lines.push(format!("Labels: {}", fields.labels.join(", ")));
    }
    if let Some(description) = fields.description.as_ref().filter(|d| !d.is_null()) {
        lines.push("Description:".to_string());
        lines.push(decode_value(Some(description)));
    }

    lines.join("\n")
}

/// One-line issue summary for search results.
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    format!(
        "{} [{}] {}",
        issue.key,
        name_or_unknown(issue.fields.status.as_ref()),
        issue.fields.summary.as_deref().unwrap_or(NO_SUMMARY)
    )
}

/// Search results, one issue per line, plus the next page token if any.
#[must_use]
pub fn format_search(results: &SearchResults) -> String {
    if results.issues.is_empty() {
        return "No issues found.".to_string();
    }

    let mut out = results
        .issues
        .iter()
        .map(format_issue_line)
        .collect::<Vec<_>>()
        .join("\n");
    if let Some(token) = &results.next_page_token {
        let _ = write!(out, "\n\nNext page token: {token}");
    }
    out
}

/// A single comment with author and timestamp header.
#[must_use]
pub fn format_comment(comment: &Comment) -> String {
    let author = display_name(comment.author.as_ref()).unwrap_or(UNKNOWN_AUTHOR);
    let created = comment.created.as_deref().unwrap_or(UNKNOWN_FIELD);
    let body = decode_value(comment.body.as_ref());
    let body = if body.is_empty() { EMPTY_BODY } else { body.as_str() };
    format!("{author} ({created}):\n{body}")
}

/// All comments separated by blank lines.
#[must_use]
pub fn format_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments.".to_string();
    }
    comments
        .iter()
        .map(format_comment)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Available transitions as `id: name -> target status`.
#[must_use]
pub fn format_transitions(transitions: &[Transition]) -> String {
    if transitions.is_empty() {
        return "No transitions available.".to_string();
    }
    transitions
        .iter()
        .map(|t| {
            format!(
                "{}: {} -> {}",
                t.id,
                t.name.as_deref().unwrap_or(UNKNOWN_FIELD),
                name_or_unknown(t.to.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Projects as `KEY: Name`, with a hint when more pages exist.
#[must_use]
pub fn format_projects(page: &ProjectPage) -> String {
    if page.values.is_empty() {
        return "No projects found.".to_string();
    }

    let mut out = page
        .values
        .iter()
        .map(|p| format!("{}: {}", p.key, p.name.as_deref().unwrap_or(UNKNOWN_FIELD)))
        .collect::<Vec<_>>()
        .join("\n");
    if page.is_last == Some(false) {
        let next = page.start_at.unwrap_or(0) + page.values.len() as u64;
        let _ = write!(out, "\n\nMore projects available from start_at={next}");
    }
    out
}

/// The authenticated user.
#[must_use]
pub fn format_user(user: &User) -> String {
    let mut lines = vec![format!(
        "Name: {}",
        user.display_name.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    )];
    if let Some(account_id) = &user.account_id {
        lines.push(format!("Account ID: {account_id}"));
    }
    if let Some(email) = &user.email_address {
        lines.push(format!("Email: {email}"));
    }
    if let Some(time_zone) = &user.time_zone {
        lines.push(format!("Time zone: {time_zone}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueFields, Project};
    use serde_json::json;

    fn named(name: &str) -> Option<Named> {
        Some(Named {
            id: None,
            name: Some(name.to_string()),
        })
    }

    fn user(name: &str) -> Option<User> {
        Some(User {
            display_name: Some(name.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_issue_with_all_fields() {
        let issue = Issue {
            id: Some("1".to_string()),
            key: "PROJ-1".to_string(),
            fields: IssueFields {
                summary: Some("Crash on start".to_string()),
                issuetype: named("Bug"),
                status: named("Open"),
                priority: named("High"),
                assignee: user("Alice"),
                reporter: user("Bob"),
                labels: vec!["crash".to_string(), "ui".to_string()],
                description: Some(json!({
                    "type": "doc",
                    "version": 1,
                    "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Steps"}]}]
                })),
                ..Default::default()
            },
        };

        assert_eq!(
            format_issue(&issue),
            "Key: PROJ-1\n\
             Summary: Crash on start\n\
             Type: Bug | Status: Open | Priority: High\n\
             Assignee: Alice\n\
             Reporter: Bob\n\
             Labels: crash, ui\n\
             Description:\n\
             Steps"
        );
    }

    #[test]
    fn test_issue_without_optional_fields() {
        let issue = Issue {
            key: "PROJ-2".to_string(),
            ..Default::default()
        };

        assert_eq!(
            format_issue(&issue),
            "Key: PROJ-2\nSummary: (no summary)\nType: ? | Status: ? | Priority: ?"
        );
    }

    #[test]
    fn test_issue_with_null_description_omits_it() {
        let issue = Issue {
            key: "PROJ-3".to_string(),
            fields: IssueFields {
                description: Some(serde_json::Value::Null),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!format_issue(&issue).contains("Description"));
    }

    #[test]
    fn test_comment_defaults() {
        let comment = Comment::default();
        assert_eq!(format_comment(&comment), "Unknown (?):\n(empty)");
    }

    #[test]
    fn test_comment_with_body() {
        let comment = Comment {
            author: user("Carol"),
            created: Some("2024-01-01T10:00:00.000+0000".to_string()),
            body: Some(json!({
                "type": "doc",
                "version": 1,
                "content": [{"type": "paragraph", "content": [
                    {"type": "text", "text": "Hi "},
                    {"type": "mention", "attrs": {"text": "Dave"}}
                ]}]
            })),
            ..Default::default()
        };
        assert_eq!(
            format_comment(&comment),
            "Carol (2024-01-01T10:00:00.000+0000):\nHi @Dave"
        );
    }

    #[test]
    fn test_comments_empty() {
        assert_eq!(format_comments(&[]), "No comments.");
    }

    #[test]
    fn test_search_with_token() {
        let results = SearchResults {
            issues: vec![
                Issue {
                    key: "PROJ-1".to_string(),
                    fields: IssueFields {
                        summary: Some("First".to_string()),
                        status: named("Done"),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                Issue {
                    key: "PROJ-2".to_string(),
                    ..Default::default()
                },
            ],
            next_page_token: Some("abc".to_string()),
            is_last: Some(false),
        };

        assert_eq!(
            format_search(&results),
            "PROJ-1 [Done] First\nPROJ-2 [?] (no summary)\n\nNext page token: abc"
        );
    }

    #[test]
    fn test_search_empty() {
        assert_eq!(format_search(&SearchResults::default()), "No issues found.");
    }

    #[test]
    fn test_transitions() {
        let transitions = vec![
            Transition {
                id: "11".to_string(),
                name: Some("Start".to_string()),
                to: named("In Progress"),
            },
            Transition {
                id: "31".to_string(),
                name: None,
                to: None,
            },
        ];
        assert_eq!(
            format_transitions(&transitions),
            "11: Start -> In Progress\n31: ? -> ?"
        );
        assert_eq!(format_transitions(&[]), "No transitions available.");
    }

    #[test]
    fn test_projects_with_more_pages() {
        let page = ProjectPage {
            values: vec![Project {
                key: "PROJ".to_string(),
                name: Some("Project".to_string()),
                ..Default::default()
            }],
            start_at: Some(10),
            total: Some(30),
            is_last: Some(false),
        };
        assert_eq!(
            format_projects(&page),
            "PROJ: Project\n\nMore projects available from start_at=11"
        );
    }

    #[test]
    fn test_user() {
        let me = User {
            account_id: Some("abc".to_string()),
            display_name: Some("Alice".to_string()),
            email_address: None,
            active: Some(true),
            time_zone: Some("Europe/Berlin".to_string()),
        };
        assert_eq!(
            format_user(&me),
            "Name: Alice\nAccount ID: abc\nTime zone: Europe/Berlin"
        );
    }
}
