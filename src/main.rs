use text_chess::config::AppConfig;
use text_chess::engine::GameState;
use text_chess::session::run_session;
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    // Initialize tracing (structured logging). Stdout belongs to the game.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "text_chess=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    let mut game = match GameState::from_layout(&config.layout) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Cannot start game: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "text-chess v{} starting from {}",
        env!("CARGO_PKG_VERSION"),
        config.layout
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    if let Err(e) = run_session(&mut game, stdin, &mut stdout, &config.prompt).await {
        eprintln!("I/O error: {e}");
        std::process::exit(1);
    }
}
