use clap::Parser;
use status_board::domain::ports::EventEmitter;
use status_board::utils::error::ErrorSeverity;
use status_board::utils::{logger, validation::Validate};
use status_board::{
    create_logger, BroadcastEmitter, CliArgs, JobDirectoryScanner, PackageManagerInstaller,
    StatusBoard,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(&config.logging, args.verbose);

    tracing::info!("🚀 Starting status-board");
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let root = std::env::current_dir()?;
    let emitter = Arc::new(BroadcastEmitter::default());
    let shared_emitter: Arc<dyn EventEmitter> = emitter.clone();

    let console = Arc::new(create_logger(
        &config.logging,
        None,
        Some(shared_emitter.clone()),
    ));
    let installer = Arc::new(PackageManagerInstaller::from_config(&config.installer));
    let jobs = Arc::new(JobDirectoryScanner::new(
        root.clone(),
        config.logging.clone(),
        Some(shared_emitter.clone()),
    ));

    let board = StatusBoard::new(root, installer, jobs, console, shared_emitter);
    let port = config.server.port;

    // The board already reported the failure on stderr through its console logger.
    if let Err(e) = board.start(Some(config.board_options())).await {
        tracing::error!(
            "❌ Status board failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    // Relay board events to stdout as JSON lines until shutdown.
    let mut connection = board.connect(emitter.subscribe());
    let relay = tokio::spawn(async move {
        while let Some(event) = connection.next_event().await {
            match event.to_json() {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to serialize '{}' event: {}", event.channel(), e),
            }
        }
    });

    tracing::info!(
        "✅ Status board ready on port {} ({} subscriber(s)), press Ctrl+C to stop",
        port,
        emitter.receiver_count()
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("👋 Shutting down status-board");
    relay.abort();

    Ok(())
}
