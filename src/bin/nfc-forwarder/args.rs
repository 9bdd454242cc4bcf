use std::time::Duration;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Use the first reader whose name contains this text
    #[arg(long, env = "NFC_READER")]
    pub reader: Option<String>,

    /// Log problems instead of showing popups
    #[arg(long)]
    pub no_popups: bool,

    /// Pause before a UID is copied and pasted
    #[arg(long, default_value = "300ms", value_parser = parse_millis)]
    pub settle_delay: Duration,

    /// Pause after each tag read
    #[arg(long, default_value = "2000ms", value_parser = parse_millis)]
    pub read_delay: Duration,
}

fn parse_millis(s: &str) -> Result<Duration, String> {
    let digits = s.strip_suffix("ms").unwrap_or(s);
    digits
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| format!("invalid duration in milliseconds: {s}: {e}"))
}
