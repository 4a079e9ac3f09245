use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cvforge::cli::{render_report, Cli, Command, GenerateArgs, VerifyArgs};
use cvforge::config::Config;
use cvforge::generation::generate_variant;
use cvforge::layout::LayoutLimits;
use cvforge::records::load_record_set;
use cvforge::render::Typesetter;
use cvforge::routes::build_router;
use cvforge::state::AppState;
use cvforge::verify::{verify_variants, VerifyOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first; flags override the environment
    let mut config = Config::from_env()?;
    cli.apply_overrides(&mut config);

    // Initialize structured logging. stdout carries reports, so logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting cvforge v{}", env!("CARGO_PKG_VERSION"));

    let code = match &cli.command {
        Command::Generate(args) => generate(&config, args).await?,
        Command::Verify(args) => verify(&config, args).await?,
        Command::Serve(_) => {
            serve(config).await?;
            0
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn load_limits(config: &Config) -> Result<LayoutLimits> {
    let limits = LayoutLimits::load(config.layout_file.as_deref())
        .context("Failed to load layout limits")?;
    if let Some(path) = &config.layout_file {
        info!(path = %path.display(), "Layout limits loaded from file");
    }
    Ok(limits)
}

async fn generate(config: &Config, args: &GenerateArgs) -> Result<i32> {
    let records = load_record_set(&config.data_dir)?;
    let limits = load_limits(config)?;
    let typesetter = Typesetter::from_command_line(&config.typesetter, config.render_timeout)?;

    for variant in args.variants() {
        let doc = generate_variant(
            &records,
            variant,
            args.format,
            &config.output_dir,
            &limits,
            &typesetter,
        )
        .await
        .with_context(|| format!("Failed to generate {variant}"))?;

        println!("Generated {}", doc.path.display());
        println!("  Lines: {}", doc.lines);
        println!("  Size: {} bytes", doc.bytes);
    }
    Ok(0)
}

async fn verify(config: &Config, args: &VerifyArgs) -> Result<i32> {
    // A missing category aborts here, before any variant is checked.
    let records = load_record_set(&config.data_dir)?;
    let limits = load_limits(config)?;

    let options = VerifyOptions {
        output_dir: config.output_dir.clone(),
        format: args.format,
        extractor: config.extractor,
        timeout: config.render_timeout,
    };
    let summary = verify_variants(&records, &args.variants(), &options, &limits).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_report(&summary));
    }

    if !summary.passed {
        error!(run_id = %summary.run_id, "Completeness check failed");
    }
    Ok(summary.exit_code())
}

async fn serve(config: Config) -> Result<()> {
    let records = load_record_set(&config.data_dir)?;
    let limits = load_limits(&config)?;

    let state = AppState {
        records: Arc::new(records),
        limits: Arc::new(limits),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
