mod api;
mod app_state;
mod http;
mod logging;
mod services;
mod settings;
mod stop_flag;
mod sweeper;

use http::setup_http_server;
use sweeper::setup_expiry_sweeper;
use tracing::info;

use clap::Parser;

#[derive(Parser)]
#[command(name = "uppye")]
#[command(about = "Authentication and authorization service for the Uppye platform")]
#[clap(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
enum Commands {
    /// Show current configuration and exit
    Config,
    /// Start the uppye server (default)
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env.local first, then .env (dotenvy doesn't override existing vars)
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Config => {
            let app_state = app_state::AppState::new_for_config_only().await?;
            println!("{:#?}", &app_state.settings);
            return Ok(());
        }
        Commands::Run => {
            // Continue with the normal server startup
        }
    }

    logging::init_logging()?;

    let mut handles = vec![];

    let app_state = app_state::AppState::new().await?;

    // Setup http server.
    {
        let handle = setup_http_server(
            app_state.clone(),
            &app_state.clone().settings.api.bind_address,
        )
        .await?;

        handles.push(handle);
    }

    // Setup the expired-session sweeper.
    {
        let handle = setup_expiry_sweeper(app_state.clone()).await?;
        handles.push(handle);
    }

    loop {
        // Remove and await completed handles
        handles.retain(|handle| !handle.is_finished());

        // Break the loop if no more handles are running
        if handles.is_empty() {
            info!("All tasks are done");
            break;
        }

        // Sleep for a short duration to avoid busy-waiting
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
    }

    Ok(())
}
