use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use paper_nouns::{Config, run};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load();
    info!("data directory: {}", config.data_dir.display());
    info!("plot directory: {}", config.plot_dir.display());
    info!(
        "language resources at {} (wordnet mode: {:?})",
        config.resources_dir.display(),
        config.wordnet_mode
    );
    info!(
        "column `{}`, top {} words, removing years {:?}",
        config.text_column, config.top_k, config.remove_years
    );

    let start = Instant::now();
    let output = run(&config)?;
    info!(
        "{} documents, {} ranked nouns in {} ms",
        output.documents,
        output.ranked_words,
        start.elapsed().as_millis()
    );
    info!("word chart: {}", output.words_chart.display());
    info!("year chart: {}", output.years_chart.display());
    if let Some(dump) = &output.dump {
        info!("ranked nouns dumped to {}", dump.display());
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();
}
