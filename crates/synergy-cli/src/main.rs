use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use synergy_api::{ApiClient, ApiConfig};
use synergy_session::{FileStorage, SessionStore};
use synergy_state::{Dashboard, ProjectView};
use synergy_types::display;
use synergy_types::models::{TaskPriority, TaskStatus};

#[derive(Parser)]
#[command(name = "synergy")]
#[command(about = "SynergySphere from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Log in and persist the session
    Login { email: String, password: String },
    /// Clear the persisted session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List your projects
    Projects {
        /// Filter by name or description
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a project
    CreateProject {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        due_date: Option<NaiveDate>,
    },
    /// Join a project
    Join { project_id: i64 },
    /// Show a project's task board
    Board { project_id: i64 },
    /// Add a task to a project
    AddTask {
        project_id: i64,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        assignee: Option<i64>,
        #[arg(long)]
        priority: Option<TaskPriority>,
        #[arg(long)]
        due_date: Option<NaiveDate>,
    },
    /// Move a task to another column
    Move {
        project_id: i64,
        task_id: i64,
        status: TaskStatus,
    },
    /// Reassign a task (omit --to to unassign)
    Assign {
        project_id: i64,
        task_id: i64,
        #[arg(long)]
        to: Option<i64>,
    },
    /// Change a task's priority
    Priority {
        project_id: i64,
        task_id: i64,
        priority: TaskPriority,
    },
    /// Show project chat
    Chat { project_id: i64 },
    /// Send a chat message
    Send { project_id: i64, message: String },
    /// List project members
    Members { project_id: i64 },
    /// Add a member by email
    AddMember { project_id: i64, email: String },
    /// Show the project leaderboard
    Leaderboard { project_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synergy=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ApiConfig::from_env().context("invalid SYNERGY_API_URL")?;
    let client = ApiClient::new(config);
    let storage = FileStorage::open().context("cannot open session storage")?;
    let mut store = SessionStore::restore(client.clone(), Box::new(storage)).await;

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
        } => {
            store.signup(&name, &email, &password).await?;
            println!("Welcome, {}!", current_name(&store));
        }
        Commands::Login { email, password } => {
            store.login(&email, &password).await?;
            println!("Logged in as {}", current_name(&store));
        }
        Commands::Logout => {
            store.logout();
            println!("Logged out.");
        }
        Commands::Whoami => match store.user() {
            Some(user) => {
                let token_note = if store.token().is_some() {
                    ""
                } else {
                    " (degraded session, log in again)"
                };
                println!("{} <{}>{token_note}", user.display_name(), user.email);
            }
            None => println!("Not logged in."),
        },
        Commands::Projects { search } => {
            let token = require_token(&store)?;
            let mut dash = Dashboard::new();
            dash.load(&client, &token).await?;
            let query = search.unwrap_or_default();
            for project in dash.search(&query) {
                println!(
                    "#{:<4} {:<30} [{}] {}/{} tasks ({}%)",
                    project.id,
                    project.name,
                    display::status_badge(project.status),
                    project.tasks_completed,
                    project.total_tasks,
                    project.progress_percentage(),
                );
            }
            let stats = dash.stats();
            println!(
                "{} active, {} tasks done, {} pending, {} overdue",
                stats.active_projects,
                stats.tasks_completed,
                stats.pending_tasks,
                stats.overdue_projects,
            );
        }
        Commands::CreateProject {
            name,
            description,
            due_date,
        } => {
            let token = require_token(&store)?;
            let mut dash = Dashboard::new();
            dash.create_project(&client, &token, &name, &description, due_date)
                .await?;
            println!("Created. {} project(s) total.", dash.projects.len());
        }
        Commands::Join { project_id } => {
            let token = require_token(&store)?;
            synergy_api::projects::join_project(&client, &token, project_id).await?;
            println!("Joined project {project_id}.");
        }
        Commands::Board { project_id } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.load_all(&client, &token).await?;

            let cols = view.board.columns();
            for (title, tasks) in [
                ("To-Do", &cols.todo),
                ("In Progress", &cols.in_progress),
                ("Done", &cols.done),
            ] {
                println!("── {title} ({})", tasks.len());
                for task in tasks {
                    println!(
                        "  #{:<4} {:<40} {:<8} {}",
                        task.id,
                        task.title,
                        task.priority,
                        task.assignee_name(&view.team.members),
                    );
                }
            }
        }
        Commands::AddTask {
            project_id,
            title,
            description,
            assignee,
            priority,
            due_date,
        } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.board.load(&client, &token).await?;
            view.board
                .create_task(
                    &client,
                    &token,
                    synergy_state::NewTask {
                        title,
                        description,
                        assignee_id: assignee,
                        priority,
                        due_date,
                    },
                )
                .await?;
            println!("Added. {} task(s) on the board.", view.board.tasks.len());
        }
        Commands::Move {
            project_id,
            task_id,
            status,
        } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.board.load(&client, &token).await?;
            view.board
                .move_task(&client, &token, task_id, status)
                .await?;
            println!("Task {task_id} is now {status}.");
        }
        Commands::Assign {
            project_id,
            task_id,
            to,
        } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.board.load(&client, &token).await?;
            view.board.reassign(&client, &token, task_id, to).await?;
            match to {
                Some(member) => println!("Task {task_id} assigned to member {member}."),
                None => println!("Task {task_id} unassigned."),
            }
        }
        Commands::Priority {
            project_id,
            task_id,
            priority,
        } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.board.load(&client, &token).await?;
            view.board
                .set_priority(&client, &token, task_id, priority)
                .await?;
            println!("Task {task_id} is now {priority} priority.");
        }
        Commands::Chat { project_id } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.chat.load(&client, &token).await?;
            for message in &view.chat.messages {
                println!(
                    "[{}] {}: {}",
                    message.timestamp.format("%Y-%m-%d %H:%M"),
                    message.author,
                    message.content,
                );
            }
        }
        Commands::Send {
            project_id,
            message,
        } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.chat.send(&client, &token, &message).await?;
            println!("Sent. {} message(s) in the channel.", view.chat.messages.len());
        }
        Commands::Members { project_id } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.team.load(&client, &token).await?;
            for member in &view.team.members {
                println!(
                    "#{:<4} {:<3} {:<30} {}",
                    member.id,
                    member.initials(),
                    member.display_name(),
                    member.email,
                );
            }
        }
        Commands::AddMember { project_id, email } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.team.add_member(&client, &token, &email).await?;
            println!("Added. {} member(s).", view.team.members.len());
        }
        Commands::Leaderboard { project_id } => {
            let token = require_token(&store)?;
            let mut view = ProjectView::new(project_id);
            view.leaderboard.load(&client, &token).await?;
            for (rank, leader) in view.leaderboard.leaders.iter().enumerate() {
                println!("{:>2}. {:<30} {:.1}", rank + 1, leader.name, leader.score);
            }
        }
    }

    Ok(())
}

fn current_name(store: &SessionStore) -> String {
    store
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn require_token(store: &SessionStore) -> anyhow::Result<String> {
    match store.token() {
        Some(token) => Ok(token.to_string()),
        None => bail!("not logged in; run `synergy login <email> <password>` first"),
    }
}
