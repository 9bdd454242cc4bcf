use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Day to report on; defaults to today in --timezone, or the local day
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// IANA zone name such as Asia/Kolkata
    #[arg(long, env = "REPORT_TIMEZONE")]
    pub timezone: Option<Tz>,

    /// Earliest time of day a reading counts for the report
    #[arg(long, default_value = "09:00:00")]
    pub cutoff: NaiveTime,

    #[arg(long, env = "REPORT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Write the CSV but do not send the email
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, env = "DB_SERVER")]
    pub db_server: String,

    #[arg(long, env = "DB_PORT", default_value_t = 1433)]
    pub db_port: u16,

    #[arg(long, env = "DB_NAME")]
    pub db_name: String,

    #[arg(long, env = "DB_USER")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: String,

    #[arg(long, env = "DB_TRUST_CERT")]
    pub db_trust_cert: bool,

    #[arg(long, env = "EMAIL_SENDER")]
    pub email_sender: Option<String>,

    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    pub email_password: Option<String>,

    /// Comma separated list of addresses
    #[arg(long, env = "EMAIL_RECEIVERS")]
    pub email_receivers: Option<String>,

    #[arg(long, env = "SMTP_SERVER")]
    pub smtp_server: Option<String>,

    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,
}

impl Args {
    pub fn report_date(&self) -> NaiveDate {
        match (self.date, self.timezone) {
            (Some(date), _) => date,
            (None, Some(tz)) => Utc::now().with_timezone(&tz).date_naive(),
            (None, None) => Local::now().date_naive(),
        }
    }
}
