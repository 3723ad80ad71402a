use synergy_api::{ApiClient, ApiError, projects};
use synergy_types::models::{Project, ProjectStatus};

use crate::loader::LoadState;

/// The project dashboard: every project the user belongs to, plus the
/// derived summary stats the header cards show.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub projects: Vec<Project>,
    loads: LoadState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_projects: usize,
    pub tasks_completed: u32,
    pub pending_tasks: u32,
    pub overdue_projects: usize,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for voiding in-flight loads on teardown.
    pub fn load_state(&self) -> LoadState {
        self.loads.clone()
    }

    /// Reload the project list from the server.
    pub async fn load(&mut self, client: &ApiClient, token: &str) -> Result<(), ApiError> {
        let ticket = self.loads.begin();
        let fetched = projects::list_projects(client, token).await?;
        if self.loads.is_current(ticket) {
            self.projects = fetched.into_iter().map(Project::from).collect();
        }
        Ok(())
    }

    /// Create a project, then reload the whole list. The creation response
    /// is not trusted to rebuild the aggregate card fields (member counts,
    /// task totals, preview), so the refetch is unconditional.
    pub async fn create_project(
        &mut self,
        client: &ApiClient,
        token: &str,
        name: &str,
        description: &str,
        due_date: Option<chrono::NaiveDate>,
    ) -> Result<(), ApiError> {
        projects::create_project(client, token, name, description, due_date).await?;
        self.load(client, token).await
    }

    /// Case-insensitive substring filter over name and description,
    /// matching everything when the query is empty.
    pub fn search(&self, query: &str) -> Vec<&Project> {
        let q = query.to_lowercase();
        self.projects
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&q) || p.description.to_lowercase().contains(&q)
            })
            .collect()
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            active_projects: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Active)
                .count(),
            tasks_completed: self.projects.iter().map(|p| p.tasks_completed).sum(),
            pending_tasks: self
                .projects
                .iter()
                .map(|p| p.total_tasks.saturating_sub(p.tasks_completed))
                .sum(),
            overdue_projects: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Overdue)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, description: &str, status: ProjectStatus, done: u32, total: u32) -> Project {
        Project {
            id: 1,
            name: name.into(),
            description: description.into(),
            member_count: 1,
            tasks_completed: done,
            total_tasks: total,
            due_date: None,
            status,
            color: "bg-blue-500".into(),
        }
    }

    #[test]
    fn search_matches_name_and_description_case_insensitively() {
        let mut dash = Dashboard::new();
        dash.projects = vec![
            project("Website Redesign", "new branding", ProjectStatus::Active, 0, 0),
            project("Mobile App", "ship the MVP", ProjectStatus::Active, 0, 0),
        ];
        assert_eq!(dash.search("website").len(), 1);
        assert_eq!(dash.search("MVP").len(), 1);
        assert_eq!(dash.search("").len(), 2);
        assert_eq!(dash.search("nothing").len(), 0);
    }

    #[test]
    fn stats_aggregate_across_projects() {
        let mut dash = Dashboard::new();
        dash.projects = vec![
            project("a", "", ProjectStatus::Active, 3, 10),
            project("b", "", ProjectStatus::Overdue, 2, 4),
            project("c", "", ProjectStatus::Completed, 5, 5),
        ];
        let stats = dash.stats();
        assert_eq!(stats.active_projects, 1);
        assert_eq!(stats.tasks_completed, 10);
        assert_eq!(stats.pending_tasks, 9);
        assert_eq!(stats.overdue_projects, 1);
    }
}
