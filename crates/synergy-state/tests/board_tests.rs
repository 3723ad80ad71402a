//! Reconciliation-policy tests for the task board, driven through a stub
//! backend that counts every request it serves.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use synergy_api::{ApiClient, ApiConfig, ApiError};
use synergy_state::{NewTask, TaskBoard};
use synergy_types::models::{TaskPriority, TaskStatus};

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(ApiConfig::new(&format!("http://{addr}")).unwrap())
}

fn task_json(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "assignee_id": null,
        "status": status,
        "priority": "medium",
        "due_date": null,
        "created_at": "2024-01-01T00:00:00Z"
    })
}

struct TaskServer {
    tasks: Mutex<Vec<Value>>,
    list_calls: AtomicUsize,
    patch_calls: AtomicUsize,
    fail_patches: bool,
}

impl TaskServer {
    fn app(self: &Arc<Self>) -> Router {
        Router::new()
            .route(
                "/api/v1/tasks/by-project/{id}",
                get(|State(s): State<Arc<TaskServer>>| async move {
                    s.list_calls.fetch_add(1, Ordering::SeqCst);
                    Json(s.tasks.lock().unwrap().clone())
                }),
            )
            .route(
                "/api/v1/tasks/{id}",
                patch(
                    |State(s): State<Arc<TaskServer>>,
                     Path(id): Path<i64>,
                     Json(body): Json<Value>| async move {
                        s.patch_calls.fetch_add(1, Ordering::SeqCst);
                        if s.fail_patches {
                            return (StatusCode::INTERNAL_SERVER_ERROR, "update rejected")
                                .into_response();
                        }
                        let mut tasks = s.tasks.lock().unwrap();
                        let Some(task) = tasks.iter_mut().find(|t| t["id"] == id) else {
                            return (StatusCode::NOT_FOUND, "Task not found").into_response();
                        };
                        for (k, v) in body.as_object().unwrap() {
                            task[k.as_str()] = v.clone();
                        }
                        Json(task.clone()).into_response()
                    },
                ),
            )
            .route(
                "/api/v1/tasks",
                post(
                    |State(s): State<Arc<TaskServer>>, Json(body): Json<Value>| async move {
                        let mut tasks = s.tasks.lock().unwrap();
                        let id = 100 + tasks.len() as i64;
                        let created = task_json(id, body["title"].as_str().unwrap(), "todo");
                        tasks.push(created.clone());
                        (StatusCode::CREATED, Json(created)).into_response()
                    },
                ),
            )
            .with_state(self.clone())
    }
}

fn task_server(fail_patches: bool) -> Arc<TaskServer> {
    Arc::new(TaskServer {
        tasks: Mutex::new(vec![
            task_json(41, "draft roadmap", "done"),
            task_json(42, "build board", "in_progress"),
            task_json(43, "ship it", "todo"),
        ]),
        list_calls: AtomicUsize::new(0),
        patch_calls: AtomicUsize::new(0),
        fail_patches,
    })
}

#[tokio::test]
async fn move_task_patches_only_the_affected_task_without_refetch() {
    let server = task_server(false);
    let client = client_for(spawn(server.app()).await);

    let mut board = TaskBoard::new(1);
    board.load(&client, "tok").await.unwrap();
    assert_eq!(server.list_calls.load(Ordering::SeqCst), 1);

    board
        .move_task(&client, "tok", 42, TaskStatus::Done)
        .await
        .unwrap();

    // One PATCH, no extra list read: reconciliation is the local patch.
    assert_eq!(server.patch_calls.load(Ordering::SeqCst), 1);
    assert_eq!(server.list_calls.load(Ordering::SeqCst), 1);

    let by_id = |id: i64| board.tasks.iter().find(|t| t.id == id).unwrap();
    assert_eq!(by_id(42).status, TaskStatus::Done);
    assert_eq!(by_id(41).status, TaskStatus::Done);
    assert_eq!(by_id(43).status, TaskStatus::Todo);
}

#[tokio::test]
async fn failed_move_leaves_local_state_untouched() {
    let server = task_server(true);
    let client = client_for(spawn(server.app()).await);

    let mut board = TaskBoard::new(1);
    board.load(&client, "tok").await.unwrap();

    let err = board
        .move_task(&client, "tok", 42, TaskStatus::Done)
        .await
        .unwrap_err();
    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "update rejected");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let task = board.tasks.iter().find(|t| t.id == 42).unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn reassign_and_priority_follow_the_local_patch_policy() {
    let server = task_server(false);
    let client = client_for(spawn(server.app()).await);

    let mut board = TaskBoard::new(1);
    board.load(&client, "tok").await.unwrap();

    board.reassign(&client, "tok", 43, Some(7)).await.unwrap();
    board
        .set_priority(&client, "tok", 43, TaskPriority::High)
        .await
        .unwrap();

    assert_eq!(server.patch_calls.load(Ordering::SeqCst), 2);
    assert_eq!(server.list_calls.load(Ordering::SeqCst), 1);

    let task = board.tasks.iter().find(|t| t.id == 43).unwrap();
    assert_eq!(task.assignee_id, Some(7));
    assert_eq!(task.priority, TaskPriority::High);
}

#[tokio::test]
async fn create_task_reloads_the_list_instead_of_appending_the_response() {
    let server = task_server(false);
    let client = client_for(spawn(server.app()).await);

    let mut board = TaskBoard::new(1);
    board.load(&client, "tok").await.unwrap();
    assert_eq!(board.tasks.len(), 3);

    board
        .create_task(
            &client,
            "tok",
            NewTask {
                title: "review the board".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // The second list call proves the observable state came from a fresh
    // GET, not from the POST response.
    assert_eq!(server.list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(board.tasks.len(), 4);
    assert!(board.tasks.iter().any(|t| t.title == "review the board"));
}

#[tokio::test]
async fn columns_group_by_view_status() {
    let server = task_server(false);
    let client = client_for(spawn(server.app()).await);

    let mut board = TaskBoard::new(1);
    board.load(&client, "tok").await.unwrap();

    let cols = board.columns();
    assert_eq!(cols.todo.len(), 1);
    assert_eq!(cols.in_progress.len(), 1);
    assert_eq!(cols.done.len(), 1);
    assert_eq!(cols.in_progress[0].id, 42);
}
