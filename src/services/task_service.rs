// opti-week/client/src/services/task_service.rs
use crate::config::ApiConfig;
use crate::error_handler::ClientError;
use crate::models::Task;
use awc::http::{header, StatusCode};
use awc::Client;

/// Client for the task endpoints of the planner service.
///
/// Each call is a single request with no retry. The timeout is disabled: a
/// call waits until the service answers or the connection fails.
#[derive(Clone)]
pub struct TaskService {
    client: Client,
    config: ApiConfig,
}

// Toute réponse hors 2xx devient une erreur, avec le corps pour le diagnostic
fn check_status(
    method: &str,
    url: &str,
    status: StatusCode,
    body: &[u8],
) -> Result<(), ClientError> {
    if status.is_success() {
        return Ok(());
    }
    log::warn!("{} {} answered with status {}", method, url, status);
    Err(ClientError::Status {
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

impl TaskService {
    pub fn new(config: ApiConfig) -> Self {
        let client = Client::builder().disable_timeout().finish();
        TaskService { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET `/tasks`.
    ///
    /// The body is decoded as JSON whatever the Content-Type header says.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let url = self.config.tasks_url();
        log::debug!("GET {}", url);

        let mut response = self
            .client
            .get(&url)
            .insert_header((header::ACCEPT, "application/json"))
            .send()
            .await?;

        let status = response.status();
        let body = response
            .body()
            .limit(self.config.max_body_bytes())
            .await?;
        check_status("GET", &url, status, &body)?;

        let tasks: Vec<Task> = serde_json::from_slice(&body)?;
        log::info!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    /// DELETE `/scheduled-tasks/{id}`. The response body is ignored.
    pub async fn delete_scheduled_task(&self, id: &str) -> Result<(), ClientError> {
        let url = self.config.scheduled_task_url(id)?;
        log::debug!("DELETE {}", url);

        let mut response = self.client.delete(&url).send().await?;

        let status = response.status();
        let body = response
            .body()
            .limit(self.config.max_body_bytes())
            .await?;
        check_status("DELETE", &url, status, &body)?;

        log::info!("Deleted scheduled task {}", id);
        Ok(())
    }
}

// Raccourcis pour un appel ponctuel, sans garder de client
pub async fn fetch_tasks(config: &ApiConfig) -> Result<Vec<Task>, ClientError> {
    TaskService::new(config.clone()).fetch_tasks().await
}

pub async fn delete_scheduled_task(config: &ApiConfig, id: &str) -> Result<(), ClientError> {
    TaskService::new(config.clone())
        .delete_scheduled_task(id)
        .await
}
