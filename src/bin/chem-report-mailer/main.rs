mod args;

use std::{fs, process::ExitCode};

use anyhow::{Context as _, Result, anyhow};
use args::Args;
use clap::Parser as _;
use lettre::message::Mailbox;
use plant_automation::{
    db::{self, ConnectOptions},
    logging,
    report::{ReportMail, SmtpOptions, parse_receivers, render_html, send_report, write_csv_file},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();

    if let Err(e) = run().await {
        error!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let date = args.report_date();

    let mut client = db::connect(&ConnectOptions {
        server: args.db_server.clone(),
        port: args.db_port,
        database: args.db_name.clone(),
        user: args.db_user.clone(),
        password: args.db_password.clone(),
        trust_cert: args.db_trust_cert,
    })
    .await
    .context("failed to connect to database")?;

    let readings = db::fetch_first_readings(&mut client, date, args.cutoff)
        .await
        .with_context(|| format!("failed to fetch tank readings for {date}"))?;
    info!("fetched {} tank readings for {date}", readings.len());

    let html = render_html(&readings);

    let csv_path = write_csv_file(&args.output_dir, date, &readings)
        .context("failed to save CSV report")?;
    info!("saved {:?}", csv_path);

    if args.dry_run {
        info!("dry run, email not sent");
        return Ok(());
    }

    let sender = args
        .email_sender
        .as_deref()
        .ok_or_else(|| anyhow!("EMAIL_SENDER is not set"))?;
    let password = args
        .email_password
        .clone()
        .ok_or_else(|| anyhow!("EMAIL_PASSWORD is not set"))?;
    let receivers = args
        .email_receivers
        .as_deref()
        .ok_or_else(|| anyhow!("EMAIL_RECEIVERS is not set"))?;
    let smtp_server = args
        .smtp_server
        .clone()
        .ok_or_else(|| anyhow!("SMTP_SERVER is not set"))?;

    let csv = fs::read(&csv_path).with_context(|| format!("failed to read file: {csv_path:?}"))?;
    let csv_file_name = csv_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("CSV path has no file name: {csv_path:?}"))?;

    let mail = ReportMail {
        sender: sender
            .parse::<Mailbox>()
            .with_context(|| format!("invalid sender address: {sender}"))?,
        receivers: parse_receivers(receivers).context("failed to parse EMAIL_RECEIVERS")?,
        html,
        csv_file_name,
        csv,
    };

    let smtp = SmtpOptions {
        server: smtp_server,
        port: args.smtp_port,
        user: sender.to_string(),
        password,
    };

    send_report(&smtp, &mail)
        .await
        .context("failed to email report")?;

    Ok(())
}
