//! MCP server for Jira.
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes
//! the Jira Cloud REST API to AI assistants like Claude.
//!
//! # Architecture
//!
//! The server uses the `rmcp` crate for MCP protocol handling. Tools call
//! Jira through the [`JiraApi`] trait, implemented over HTTP by
//! [`HttpJiraClient`]. Rich-text fields (descriptions, comments, worklog
//! notes) are converted to and from plain text by the `jira-adf` crate.
//!
//! # Tools
//!
//! ## Discovery
//! - `jira_whoami` - Show the authenticated user
//! - `jira_list_projects` - List visible projects
//!
//! ## Issue Queries
//! - `jira_search` - Search with JQL
//! - `jira_get_issue` - Show issue details
//! - `jira_get_comments` - Read comments
//! - `jira_get_transitions` - List available workflow transitions
//!
//! ## Issue Modification
//! - `jira_create_issue` - Create an issue
//! - `jira_update_issue` - Update summary, description, priority or labels
//! - `jira_assign_issue` - Assign or unassign
//! - `jira_add_comment` - Add a comment
//! - `jira_transition_issue` - Move to another status
//! - `jira_add_worklog` - Log time

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod models;
pub mod server;
pub mod tools;

pub use client::{HttpJiraClient, JiraApi};
pub use config::JiraConfig;
pub use error::{Error, Result};
pub use server::JiraMcpServer;
