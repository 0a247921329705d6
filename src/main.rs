// opti-week/client/src/main.rs
use opti_week_client::{ApiConfig, TaskService};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "usage: opti-week <tasks | delete-scheduled <id>>";

#[actix_web::main]
async fn main() -> ExitCode {
    // Initialiser le logger
    env_logger::init();

    // Charger les variables d'environnement
    if cfg!(debug_assertions) {
        match dotenvy::dotenv() {
            Ok(path) => log::info!(".env file loaded from path: {}", path.display()),
            Err(e) => log::warn!(
                "Could not load .env file: {}, using environment variables.",
                e
            ),
        }
    }

    let service = TaskService::new(ApiConfig::from_env());
    log::info!("Using planner API at {}", service.config().base_url());

    let args: Vec<String> = env::args().skip(1).collect();
    let outcome = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["tasks"] => match service.fetch_tasks().await {
            Ok(tasks) => match serde_json::to_string_pretty(&tasks) {
                Ok(rendered) => {
                    println!("{}", rendered);
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            },
            Err(e) => Err(e.to_string()),
        },
        ["delete-scheduled", id] => service
            .delete_scheduled_task(id)
            .await
            .map(|()| println!("Deleted scheduled task {}", id))
            .map_err(|e| e.to_string()),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}
