use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::agents;
use client::api::{HttpApi, UploadFile};
use client::batch::runner::{run_batch, BatchOptions};
use client::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting recruiting client v{}", env!("CARGO_PKG_VERSION"));

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("Usage: client <resume-file>...");
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let bytes = tokio::fs::read(path).await?;
        let filename = std::path::Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        files.push(UploadFile::new(filename, bytes));
    }

    let api = HttpApi::new(&config.api_base_url);
    let selection = agents::sync_with_backend(&api).await?;
    info!(
        "Using agent {:?} (model {:?})",
        selection.current_agent, selection.current_model
    );

    let options = BatchOptions {
        use_ai_extraction: config.use_ai_extraction,
        selection,
    };

    // Print each new log line as the run progresses.
    let mut printed = 0usize;
    let run = run_batch(&api, &files, &options, |snapshot| {
        for line in &snapshot.log()[printed..] {
            println!("{line}");
        }
        printed = snapshot.log().len();
    })
    .await?;

    if run.failed() > 0 {
        bail!("{} of {} file(s) failed", run.failed(), run.total_files);
    }
    Ok(())
}
