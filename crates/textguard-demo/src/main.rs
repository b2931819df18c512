use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use textguard_demo::cli::Cli;
use textguard_demo::server::run_server;
use textguard_demo::state::AppState;
use textguard_model::{ModelProvisioner, ModelSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let source = ModelSource::parse(&cli.model);
    let provisioner = Arc::new(
        ModelProvisioner::new(source.clone())
            .with_archive_root(&cli.archive_root)
            .with_device(cli.device),
    );

    let addr: SocketAddr = format!("{}:{}", cli.address, cli.port).parse()?;

    println!();
    println!("  TextGuard — spam/suspicious text classification demo");
    println!("  Model:  {}", source.describe());
    println!();
    println!("  Open http://{} in your browser", addr);
    println!();

    // Warm the model up front so the first request doesn't pay for
    // acquisition. A failure here is not fatal: the provisioner retries on
    // the next classify call and the UI shows the failure kind meanwhile.
    match provisioner.get().await {
        Ok(model) => tracing::info!(model = model.name(), "model loaded and ready"),
        Err(err) => tracing::warn!(
            kind = err.kind(),
            "model failed to load: {err}; classification disabled until a retry succeeds"
        ),
    }

    let state = AppState::new(provisioner);
    run_server(state, addr).await?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "textguard_demo=debug,textguard_model=debug,tower_http=debug"
    } else {
        "textguard_demo=info,textguard_model=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
