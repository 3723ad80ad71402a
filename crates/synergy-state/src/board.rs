use chrono::NaiveDate;

use synergy_api::{ApiClient, ApiError, tasks};
use synergy_types::api::{CreateTaskRequest, UpdateTaskRequest};
use synergy_types::models::{Task, TaskPriority, TaskStatus};

use crate::loader::LoadState;
use crate::retry::with_membership_retry;

/// The kanban board for one project.
///
/// Status, priority and assignee changes are optimistic-write-then-local-
/// patch: the PATCH goes out first, and only on success is the one affected
/// task updated in place. No refetch and no rollback needed, because local
/// state is never touched before the server confirms. Creation always
/// refetches the full list.
#[derive(Debug)]
pub struct TaskBoard {
    project_id: i64,
    pub tasks: Vec<Task>,
    loads: LoadState,
}

/// Draft for a new task; only the title is required.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<i64>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Default)]
pub struct BoardColumns<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl TaskBoard {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            tasks: Vec::new(),
            loads: LoadState::new(),
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn load_state(&self) -> LoadState {
        self.loads.clone()
    }

    /// Reload the task list, joining the project first if the backend says
    /// the user is not a member yet.
    pub async fn load(&mut self, client: &ApiClient, token: &str) -> Result<(), ApiError> {
        let ticket = self.loads.begin();
        let fetched = with_membership_retry(client, token, self.project_id, || {
            tasks::list_tasks(client, token, self.project_id)
        })
        .await?;
        if self.loads.is_current(ticket) {
            self.tasks = fetched.into_iter().map(Task::from).collect();
        }
        Ok(())
    }

    /// Move a task between columns. All six transitions among
    /// todo / in-progress / done are allowed; nothing moves automatically.
    ///
    /// On success only the affected task's status changes locally; on
    /// failure local state is untouched and the error propagates to the
    /// caller for display.
    pub async fn move_task(
        &mut self,
        client: &ApiClient,
        token: &str,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<(), ApiError> {
        let update = UpdateTaskRequest {
            status: Some(status.to_wire()),
            ..Default::default()
        };
        tasks::update_task(client, token, task_id, &update).await?;
        self.patch_local(task_id, |t| t.status = status);
        Ok(())
    }

    /// Reassign a task; `None` clears the assignee.
    pub async fn reassign(
        &mut self,
        client: &ApiClient,
        token: &str,
        task_id: i64,
        assignee_id: Option<i64>,
    ) -> Result<(), ApiError> {
        let update = UpdateTaskRequest {
            // The backend reads assignee_id 0 as "unassign".
            assignee_id: Some(assignee_id.unwrap_or(0)),
            ..Default::default()
        };
        tasks::update_task(client, token, task_id, &update).await?;
        self.patch_local(task_id, |t| t.assignee_id = assignee_id);
        Ok(())
    }

    pub async fn set_priority(
        &mut self,
        client: &ApiClient,
        token: &str,
        task_id: i64,
        priority: TaskPriority,
    ) -> Result<(), ApiError> {
        let update = UpdateTaskRequest {
            priority: Some(priority),
            ..Default::default()
        };
        tasks::update_task(client, token, task_id, &update).await?;
        self.patch_local(task_id, |t| t.priority = priority);
        Ok(())
    }

    /// Create a task, then reload the list in full. The POST response is
    /// never appended locally, because ordering and derived fields are
    /// server-owned.
    pub async fn create_task(
        &mut self,
        client: &ApiClient,
        token: &str,
        draft: NewTask,
    ) -> Result<(), ApiError> {
        let body = CreateTaskRequest {
            project_id: self.project_id,
            title: draft.title,
            description: draft.description,
            assignee_id: draft.assignee_id,
            priority: draft.priority,
            due_date: draft.due_date,
            status: None,
        };
        tasks::create_task(client, token, &body).await?;
        self.load(client, token).await
    }

    pub fn columns(&self) -> BoardColumns<'_> {
        let mut cols = BoardColumns::default();
        for task in &self.tasks {
            match task.status {
                TaskStatus::Todo => cols.todo.push(task),
                TaskStatus::InProgress => cols.in_progress.push(task),
                TaskStatus::Done => cols.done.push(task),
            }
        }
        cols
    }

    fn patch_local(&mut self, task_id: i64, patch: impl FnOnce(&mut Task)) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            patch(task);
        }
    }
}
