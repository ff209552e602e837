//! MCP server implementation.
//!
//! This module contains the main server setup using rmcp.

use crate::client::JiraApi;
use crate::error::Error;
use crate::models::{
    AddCommentParams, AddWorklogParams, AssignIssueParams, CreateIssueParams, GetCommentsParams,
    IssueKeyParams, ListProjectsParams, SearchParams, TransitionIssueParams, UpdateIssueParams,
};
use crate::tools::Tools;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::{
    ErrorData as McpError, ServiceExt, handler::server::ServerHandler, tool, tool_handler,
    tool_router,
};
use std::sync::Arc;
use tracing::info;

/// Convert a tool outcome into an MCP result.
///
/// Parameter problems become `invalid_params`; everything else is an
/// `internal_error` carrying the error text.
fn into_call_result(
    outcome: crate::error::Result<String>,
) -> std::result::Result<CallToolResult, McpError> {
    match outcome {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) if e.is_invalid_params() => Err(McpError::invalid_params(e.to_string(), None)),
        Err(e) => Err(McpError::internal_error(e.to_string(), None)),
    }
}

/// The Jira MCP server.
///
/// Provides MCP protocol handling over stdio transport.
#[derive(Clone)]
pub struct JiraMcpServer {
    /// Tool implementations.
    tools: Arc<Tools>,
    /// Tool router for MCP dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl JiraMcpServer {
    /// Show the authenticated user.
    #[tool(description = "Show the Jira user the server is authenticated as.")]
    async fn jira_whoami(&self) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.whoami().await)
    }

    /// List projects.
    #[tool(description = "List Jira projects visible to the authenticated user.")]
    async fn jira_list_projects(
        &self,
        Parameters(params): Parameters<ListProjectsParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.list_projects(params).await)
    }

    /// Search issues with JQL.
    #[tool(
        description = "Search issues with JQL. Pass next_page_token from a previous result to get the next page."
    )]
    async fn jira_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.search(params).await)
    }

    /// Show one issue.
    #[tool(
        description = "Show an issue: summary, type, status, priority, people, labels and description."
    )]
    async fn jira_get_issue(
        &self,
        Parameters(params): Parameters<IssueKeyParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.get_issue(&params.issue_key).await)
    }

    /// Create an issue.
    #[tool(
        description = "Create an issue. The description is plain text; blank lines separate paragraphs."
    )]
    async fn jira_create_issue(
        &self,
        Parameters(params): Parameters<CreateIssueParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.create_issue(params).await)
    }

    /// Update an issue.
    #[tool(description = "Update an issue's summary, description, priority or labels.")]
    async fn jira_update_issue(
        &self,
        Parameters(params): Parameters<UpdateIssueParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.update_issue(params).await)
    }

    /// Assign an issue.
    #[tool(description = "Assign an issue to an account id, or unassign it when none is given.")]
    async fn jira_assign_issue(
        &self,
        Parameters(params): Parameters<AssignIssueParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.assign_issue(params).await)
    }

    /// Read comments.
    #[tool(description = "Read the comments on an issue.")]
    async fn jira_get_comments(
        &self,
        Parameters(params): Parameters<GetCommentsParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.get_comments(params).await)
    }

    /// Add a comment.
    #[tool(description = "Add a plain-text comment to an issue.")]
    async fn jira_add_comment(
        &self,
        Parameters(params): Parameters<AddCommentParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.add_comment(params).await)
    }

    /// List transitions.
    #[tool(
        description = "List the workflow transitions available on an issue, with the ids needed by jira_transition_issue."
    )]
    async fn jira_get_transitions(
        &self,
        Parameters(params): Parameters<IssueKeyParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.get_transitions(&params.issue_key).await)
    }

    /// Transition an issue.
    #[tool(description = "Move an issue to another status using a transition id.")]
    async fn jira_transition_issue(
        &self,
        Parameters(params): Parameters<TransitionIssueParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.transition_issue(params).await)
    }

    /// Log work.
    #[tool(description = "Log time spent on an issue, with an optional plain-text note.")]
    async fn jira_add_worklog(
        &self,
        Parameters(params): Parameters<AddWorklogParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        into_call_result(self.tools.add_worklog(params).await)
    }
}

impl JiraMcpServer {
    /// Create a new server over the given client.
    #[must_use]
    pub fn new(client: Arc<dyn JiraApi>) -> Self {
        Self {
            tools: Arc::new(Tools::new(client)),
            tool_router: Self::tool_router(),
        }
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mcp`] if the handshake fails or the service task
    /// terminates abnormally.
    pub async fn run(self) -> crate::error::Result<()> {
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;
        info!("MCP session initialized");

        let reason = service
            .waiting()
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;
        info!(?reason, "MCP session ended");
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for JiraMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "jira-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Jira MCP server. Text fields are plain text: blank lines separate paragraphs and single newlines are line breaks."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpJiraClient;
    use crate::config::JiraConfig;
    use rmcp::handler::server::ServerHandler;
    use std::time::Duration;

    fn server() -> JiraMcpServer {
        let config = JiraConfig {
            base_url: "https://example.atlassian.net".to_string(),
            email: Some("me@example.com".to_string()),
            api_token: "token".to_string(),
            timeout: Duration::from_secs(5),
        };
        JiraMcpServer::new(Arc::new(HttpJiraClient::new(&config).unwrap()))
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "jira-mcp");
        assert!(!info.server_info.version.is_empty());
        assert!(info.instructions.is_some());
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_tool_router_has_all_tools() {
        let server = server();
        let tools = server.tool_router.list_all();
        let tool_names: Vec<&str> = tools.iter().map(|t| &*t.name).collect();

        for name in [
            "jira_whoami",
            "jira_list_projects",
            "jira_search",
            "jira_get_issue",
            "jira_create_issue",
            "jira_update_issue",
            "jira_assign_issue",
            "jira_get_comments",
            "jira_add_comment",
            "jira_get_transitions",
            "jira_transition_issue",
            "jira_add_worklog",
        ] {
            assert!(tool_names.contains(&name), "missing tool {name}");
        }
        assert_eq!(tools.len(), 12);
    }

    #[test]
    fn test_invalid_argument_maps_to_invalid_params() {
        let err = into_call_result(Err(Error::InvalidArgument {
            field: "issue_key",
            value: "x".to_string(),
            reason: "bad",
        }))
        .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_api_error_maps_to_internal_error() {
        let err = into_call_result(Err(Error::Api {
            status: 500,
            message: "boom".to_string(),
        }))
        .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("boom"));
    }

    #[test]
    fn test_success_is_text_content() {
        let result = into_call_result(Ok("done".to_string())).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
    }
}
