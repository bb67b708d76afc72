use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "countryscope",
    about = "Searchable, filterable table of country records in your terminal",
    version,
    author
)]
pub struct Args {
    /// Override the countries endpoint from config.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Fetch once, print the table to stdout and exit.
    #[arg(short, long)]
    pub non_interactive: bool,

    /// Name substring filter applied in non-interactive mode.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Population bucket label applied in non-interactive mode
    /// ("Population", "<1 Million", "<5 Million", "<10 Million").
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Start the TUI without fetching; press 'r' to load.
    #[arg(long)]
    pub no_fetch: bool,
}

impl Args {
    pub fn should_fetch_on_start(&self) -> bool {
        !self.no_fetch
    }

    pub fn is_interactive_mode(&self) -> bool {
        !self.non_interactive
    }
}
