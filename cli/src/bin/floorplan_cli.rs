use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use rmcp::{ServiceExt, transport::sse_server::SseServer, transport::stdio};
use rooms::{AnalysisResponse, PipelineConfig, ServerConfig, analyze_floor_plan, mcp::FloorPlanMcpServer};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a floor-plan image and print the JSON result envelope
    Analyze {
        /// Path to the image file (PNG/JPEG/BMP), or to a payload file
        /// with --payload
        #[arg(short, long)]
        input: PathBuf,
        /// Treat the input file as an already-encoded base64 / data-URI
        /// payload instead of raw image bytes
        #[arg(long)]
        payload: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve the analysis tool over SSE (or stdio with --stdio)
    Serve {
        /// TCP port for the SSE transport
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
        /// Verbose logging
        #[arg(long)]
        debug: bool,
        /// Serve over stdio instead of SSE
        #[arg(long)]
        stdio: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let default_level = match &cli.command {
        Commands::Serve { debug: true, .. } => "debug",
        _ => "info",
    };

    // Log to stderr: stdout carries the JSON envelope for `analyze` and
    // the protocol stream for `serve --stdio`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            payload,
            pretty,
        } => analyze(&input, payload, pretty),
        Commands::Serve { port, debug, stdio } => {
            let config = ServerConfig { port, debug };
            serve(config, stdio).await
        }
    }
}

fn analyze(input: &Path, is_payload: bool, pretty: bool) -> Result<()> {
    let payload = if is_payload {
        std::fs::read_to_string(input)?
    } else {
        STANDARD.encode(std::fs::read(input)?)
    };

    let outcome = analyze_floor_plan(&payload, &PipelineConfig::default());
    if let Ok(result) = &outcome {
        info!(
            rooms = result.rooms.len(),
            width = result.image_width,
            height = result.image_height,
            "analysis complete"
        );
    }

    let envelope = AnalysisResponse::from_result(outcome);
    let json = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{json}");
    Ok(())
}

async fn serve(config: ServerConfig, over_stdio: bool) -> Result<()> {
    if over_stdio {
        return serve_stdio().await;
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!(%addr, "starting floor-plan analysis SSE server");

    let ct = SseServer::serve(addr)
        .await?
        .with_service(FloorPlanMcpServer::new);

    tokio::signal::ctrl_c().await?;
    info!("received Ctrl+C, shutting down");
    ct.cancel();
    Ok(())
}

async fn serve_stdio() -> Result<()> {
    info!("starting floor-plan analysis server on stdio");

    let server = FloorPlanMcpServer::new();
    let service = match server.serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("failed to start server: {:?}", e);
            return Err(e.into());
        }
    };

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("server completed successfully"),
                Err(e) => {
                    tracing::error!("server error: {:?}", e);
                    return Err(e.into());
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("received Ctrl+C, shutting down gracefully");
        }
    }

    Ok(())
}
