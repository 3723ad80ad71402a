use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    ApiTaskStatus, LeaderResponse, MemberResponse, MessageResponse, ProjectResponse, TaskResponse,
    UserResponse,
};
use crate::display;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    pub fn initials(&self) -> String {
        display::initials(Some(self.display_name()))
    }
}

impl From<UserResponse> for User {
    fn from(u: UserResponse) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            avatar_url: u.avatar_url,
        }
    }
}

/// The client-held authentication state.
///
/// `token` present means an authenticated session is assumed active. A user
/// without a token is a degraded legacy session (restored from a persisted
/// user record alone); a token without a user means restoration is still
/// pending or has failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_degraded(&self) -> bool {
        self.token.is_none() && self.user.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub member_count: u32,
    pub tasks_completed: u32,
    pub total_tasks: u32,
    pub due_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub color: String,
}

impl Project {
    /// Completed-over-total as a rounded percentage. Zero when the project
    /// has no tasks; may exceed 100 if the counts are inconsistent.
    pub fn progress_percentage(&self) -> u32 {
        display::progress_percentage(self.tasks_completed, self.total_tasks)
    }
}

impl From<ProjectResponse> for Project {
    fn from(p: ProjectResponse) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description.unwrap_or_default(),
            member_count: p.members,
            tasks_completed: p.tasks_completed,
            total_tasks: p.total_tasks,
            due_date: p.due_date,
            status: p.status,
            color: p.color,
        }
    }
}

/// Task status as the view layer spells it: `in-progress` with a hyphen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    pub fn to_wire(self) -> ApiTaskStatus {
        match self {
            Self::Todo => ApiTaskStatus::Todo,
            Self::InProgress => ApiTaskStatus::InProgress,
            Self::Done => ApiTaskStatus::Done,
        }
    }
}

impl From<ApiTaskStatus> for TaskStatus {
    fn from(s: ApiTaskStatus) -> Self {
        match s {
            ApiTaskStatus::Todo => Self::Todo,
            ApiTaskStatus::InProgress => Self::InProgress,
            ApiTaskStatus::Done => Self::Done,
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    /// Accepts both spellings (`in_progress` and `in-progress`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match display::api_to_ui_status(s) {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown task priority: {other}")),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<i64>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Resolve the assignee against the loaded member set. An unassigned
    /// task or an id with no matching member renders "Unassigned".
    pub fn assignee_name(&self, members: &[Member]) -> String {
        self.assignee_id
            .and_then(|id| members.iter().find(|m| m.id == id))
            .map(|m| m.display_name().to_string())
            .unwrap_or_else(|| "Unassigned".to_string())
    }
}

impl From<TaskResponse> for Task {
    fn from(t: TaskResponse) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            assignee_id: t.assignee_id,
            status: t.status.into(),
            priority: t.priority,
            due_date: t.due_date,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
}

impl Member {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    pub fn initials(&self) -> String {
        display::initials(Some(self.display_name()))
    }
}

impl From<MemberResponse> for Member {
    fn from(m: MemberResponse) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Convert a wire message list into view order. The backend returns
    /// newest-first; the chat view is append-only oldest-first.
    pub fn list_from_wire(wire: Vec<MessageResponse>) -> Vec<Message> {
        let mut out: Vec<Message> = wire.into_iter().map(Message::from).collect();
        out.sort_by_key(|m| (m.timestamp, m.id));
        out
    }
}

impl From<MessageResponse> for Message {
    fn from(m: MessageResponse) -> Self {
        Self {
            id: m.id,
            author: m.author,
            content: m.content,
            timestamp: m.timestamp,
        }
    }
}

/// Server-computed leaderboard row; re-fetched whole, never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leader {
    pub user_id: i64,
    pub name: String,
    pub avatar: Option<String>,
    pub score: f64,
}

impl From<LeaderResponse> for Leader {
    fn from(l: LeaderResponse) -> Self {
        Self {
            user_id: l.user_id,
            name: l.name,
            avatar: l.avatar,
            score: l.score,
        }
    }
}
