//! Page-level state and the reconciliation policies that keep it consistent
//! with the server after user-initiated writes.
//!
//! One policy per mutation class, applied uniformly:
//! field changes on an existing task (status, priority, assignee) patch the
//! local copy after the PATCH succeeds; creations refetch the owning list
//! in full; chat sends refetch the message list. Project sub-resource loads
//! run under a single bounded join-and-retry for non-members.

pub mod board;
pub mod chat;
pub mod dashboard;
pub mod leaderboard;
pub mod loader;
pub mod project;
pub mod retry;
pub mod team;

pub use board::{BoardColumns, NewTask, TaskBoard};
pub use chat::ChatPanel;
pub use dashboard::Dashboard;
pub use leaderboard::Leaderboard;
pub use loader::{LoadState, LoadTicket};
pub use project::ProjectView;
pub use team::TeamPanel;
