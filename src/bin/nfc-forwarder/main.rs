mod args;
mod desktop;
mod pcsc_reader;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use plant_automation::{
    logging,
    nfc::{Forwarder, Notifier, PollTimings},
};
use tracing::{error, info};

use crate::{
    desktop::{KeyboardSink, LogNotifier, PopupNotifier},
    pcsc_reader::PcscReader,
};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();

    if let Err(e) = run() {
        error!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

fn run() -> Result<()> {
    let args = Args::parse();

    let reader = PcscReader::open(args.reader.as_deref()).context("failed to open NFC reader")?;
    info!("using reader: {}", reader.name());

    let sink = KeyboardSink::new(args.settle_delay).context("failed to set up keyboard output")?;

    let notifier: Box<dyn Notifier> = if args.no_popups {
        Box::new(LogNotifier)
    } else {
        Box::new(PopupNotifier)
    };

    let timings = PollTimings {
        after_read: args.read_delay,
        ..PollTimings::default()
    };

    Forwarder::new(reader, sink, notifier, timings).run()
}
