use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gifloom::api;
use gifloom::models::{AppConfig, UserId};
use gifloom::server;
use gifloom::services::HmacTokenVerifier;

#[derive(Parser)]
#[command(name = "gifloom")]
#[command(about = "Gifloom - cross-fade GIF generation service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Generate a cross-fade GIF from local image files
    Generate {
        /// Output GIF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Display duration per source image in milliseconds
        #[arg(short, long, default_value_t = 500)]
        duration: u32,

        /// Number of interpolated frames per transition
        #[arg(long, default_value_t = 10)]
        fade_frames: u32,

        /// Display duration per fade frame in milliseconds
        #[arg(long, default_value_t = 100)]
        fade_duration: u32,

        /// Downscale inputs whose longer side exceeds this bound
        #[arg(long, default_value_t = 800)]
        max_dimension: u32,

        /// Input image files, in display order (at least 2)
        #[arg(required = true, num_args = 2..)]
        images: Vec<PathBuf>,
    },
    /// Mint a bearer token for the HTTP API
    Token {
        /// User identifier to embed in the token
        #[arg(short, long)]
        user: String,

        /// Token validity in seconds
        #[arg(long, default_value_t = 3600)]
        validity_secs: i64,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gifloom API",
        description = "Cross-fade GIF generation service",
        version = "0.4.0",
        license(name = "MIT")
    ),
    paths(api::handle_generate),
    components(schemas(api::GenerateRequest, api::GenerateResponse)),
    tags(
        (name = "Generation", description = "Animated GIF generation")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Generate {
            output,
            duration,
            fade_frames,
            fade_duration,
            max_dimension,
            images,
        }) => run_generate_command(
            &output,
            duration,
            fade_frames,
            fade_duration,
            max_dimension,
            &images,
        ),
        Some(Commands::Token {
            user,
            validity_secs,
        }) => run_token_command(&user, validity_secs),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Load configuration from CONFIG_FILE and apply environment overrides.
fn load_config() -> AppConfig {
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let mut config = AppConfig::load(config_file.as_deref());
    if let Ok(secret) = std::env::var("TOKEN_SECRET") {
        config.token_secret = Some(secret);
    }
    config
}

/// Generate a GIF from local files (no server needed)
fn run_generate_command(
    output: &PathBuf,
    duration: u32,
    fade_frames: u32,
    fade_duration: u32,
    max_dimension: u32,
    images: &[PathBuf],
) -> anyhow::Result<()> {
    use anyhow::Context;

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gifloom=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut decoded = Vec::with_capacity(images.len());
    for path in images {
        let image = image::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .to_rgba8();
        decoded.push(image);
    }

    let options = crossfade::FadeOptions {
        base_duration_ms: duration,
        fade_frames,
        fade_duration_ms: fade_duration,
        max_dimension: Some(max_dimension),
    };

    let timeline = crossfade::synthesize(decoded, &options)?;
    let frame_count = timeline.len();
    let gif_bytes = crossfade::encode(timeline)?;

    std::fs::write(output, &gif_bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "GIF saved to {} ({} frames, {} bytes)",
        output.display(),
        frame_count,
        gif_bytes.len()
    );

    Ok(())
}

/// Mint a bearer token against the configured secret
fn run_token_command(user: &str, validity_secs: i64) -> anyhow::Result<()> {
    let config = load_config();
    let Some(secret) = config.token_secret.as_deref() else {
        anyhow::bail!("TOKEN_SECRET not set; a minted token must match the server's secret");
    };

    let verifier = HmacTokenVerifier::new(secret).with_validity_secs(validity_secs);
    let token = verifier.mint(&UserId::new(user));
    println!("{token}");

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let has_secret = std::env::var("TOKEN_SECRET").is_ok();

    println!("Gifloom v{VERSION} - cross-fade GIF generation service\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR    = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE  = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TOKEN_SECRET = {}",
        if has_secret { "(set)" } else { "(not set)" }
    );

    println!("\nCommands:");
    println!("  gifloom serve      Start the HTTP server");
    println!("  gifloom generate   Generate a GIF from local image files");
    println!("  gifloom token      Mint a bearer token for the HTTP API");
    println!("\nRun 'gifloom --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gifloom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(load_config());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    tracing::info!(
        cooldown_days = config.cooldown_days,
        max_dimension = ?config.max_dimension,
        "Configuration loaded"
    );

    // Create application state using shared server module
    let state = server::create_app_state(config);

    // Build router: shared API routes plus OpenAPI documentation
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Gifloom server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
