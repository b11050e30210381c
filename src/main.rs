use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::infrastructure::SeaOrmUserRepository;
use bookshelf::{config, db, seed, server};

fn usage() -> &'static str {
    "Usage:\n  bookshelf                                  run the web server\n  bookshelf create-user <username> <password> add a user and exit"
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        None => server::run(config).await,
        Some("create-user") => match (args.get(1), args.get(2)) {
            (Some(username), Some(password)) => {
                create_user(&config.database_url, username, password).await
            }
            _ => Err(usage().to_string()),
        },
        Some(_) => Err(usage().to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn create_user(database_url: &str, username: &str, password: &str) -> Result<(), String> {
    let conn = db::init_db(database_url)
        .await
        .map_err(|e| format!("Failed to initialize database: {}", e))?;
    let users = SeaOrmUserRepository::new(conn);

    let user = seed::create_user(&users, username, password)
        .await
        .map_err(|e| format!("Could not create user: {}", e))?;
    println!("Created user '{}' (id {})", user.username, user.id);
    Ok(())
}
