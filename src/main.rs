use clap::Parser;
use countryscope::cli::Args;
use countryscope::config::Config;
use countryscope::filter::{filter_countries, PopulationBucket};
use countryscope::services::fetcher::CountryFetcher;
use countryscope::ui::{app, plain};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&args, &config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = if args.is_interactive_mode() {
        app::run(&config, &args).await
    } else {
        run_non_interactive(&config, &args).await
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Interactive mode logs to a file so the raw-mode terminal stays clean;
/// non-interactive mode logs to stderr.
fn init_logging(args: &Args, config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if args.is_interactive_mode() {
        let file = std::fs::File::create(&config.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Arc::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

/// Fetch once, apply the CLI filters, print the table, exit.
async fn run_non_interactive(config: &Config, args: &Args) -> anyhow::Result<()> {
    let bucket = match args.bucket.as_deref() {
        None => PopulationBucket::All,
        Some(label) => PopulationBucket::from_label(label).ok_or_else(|| {
            let labels: Vec<&str> = PopulationBucket::ALL.iter().map(|b| b.label()).collect();
            anyhow::anyhow!(
                "unknown bucket {:?}; expected one of: {}",
                label,
                labels.join(", ")
            )
        })?,
    };

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.countries_api_url.clone());
    let fetcher = CountryFetcher::new(endpoint);

    let records = fetcher.fetch().await?;
    let filtered = filter_countries(&records, &args.query, bucket);

    print!("{}", plain::render_plain_table(&filtered));
    println!("{} of {} shown", filtered.len(), records.len());

    Ok(())
}
