use anyhow::{Context as _, Result, bail};
use lettre::{
    AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
    message::{Attachment, Mailbox, MultiPart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::info;

use crate::report::REPORT_TITLE;

const PLAIN_BODY: &str = "Please find today's ChemTank report attached and below.";

#[derive(Debug, Clone)]
pub struct SmtpOptions {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ReportMail {
    pub sender: Mailbox,
    pub receivers: Vec<Mailbox>,
    pub html: String,
    pub csv_file_name: String,
    pub csv: Vec<u8>,
}

/// Splits a comma separated address list, ignoring blank entries.
pub fn parse_receivers(list: &str) -> Result<Vec<Mailbox>> {
    let receivers = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Mailbox>()
                .with_context(|| format!("invalid email address: {s}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if receivers.is_empty() {
        bail!("no email receivers configured");
    }

    Ok(receivers)
}

impl ReportMail {
    pub fn to_message(&self) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(REPORT_TITLE);
        for receiver in &self.receivers {
            builder = builder.to(receiver.clone());
        }

        let csv_content_type =
            ContentType::parse("text/csv").context("failed to parse CSV content type")?;
        let attachment =
            Attachment::new(self.csv_file_name.clone()).body(self.csv.clone(), csv_content_type);

        builder
            .multipart(
                MultiPart::mixed()
                    .multipart(MultiPart::alternative_plain_html(
                        PLAIN_BODY.to_string(),
                        self.html.clone(),
                    ))
                    .singlepart(attachment),
            )
            .context("failed to build report email")
    }
}

pub async fn send_report(options: &SmtpOptions, mail: &ReportMail) -> Result<()> {
    let message = mail.to_message()?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&options.server)
        .with_context(|| format!("failed to configure SMTP relay: {}", options.server))?
        .port(options.port)
        .credentials(Credentials::new(
            options.user.clone(),
            options.password.clone(),
        ))
        .build();

    transport
        .send(message)
        .await
        .with_context(|| format!("failed to send report via {}:{}", options.server, options.port))?;

    info!(
        receivers = mail.receivers.len(),
        "report email sent with {}",
        mail.csv_file_name
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_receivers() {
        let receivers = parse_receivers(" a@example.com, b@example.com ,,").unwrap();

        assert_eq!(receivers.len(), 2);
        assert_eq!(receivers[0].email.to_string(), "a@example.com");
        assert_eq!(receivers[1].email.to_string(), "b@example.com");
    }

    #[test]
    fn rejects_empty_or_bad_receivers() {
        assert!(parse_receivers(" , ").is_err());
        assert!(parse_receivers("a@example.com, not-an-address").is_err());
    }

    #[test]
    fn message_carries_bodies_and_attachment() {
        let mail = ReportMail {
            sender: "reports@example.com".parse().unwrap(),
            receivers: parse_receivers("a@example.com,b@example.com").unwrap(),
            html: "<html><body>tables</body></html>".to_string(),
            csv_file_name: "DailyReport_2026-10-18.csv".to_string(),
            csv: b"TankCode\nISO1\n".to_vec(),
        };

        let formatted = String::from_utf8(mail.to_message().unwrap().formatted()).unwrap();

        assert!(formatted.contains("Subject: Daily Chemical Tank Report"));
        assert!(formatted.contains("From: reports@example.com"));
        assert!(formatted.contains("a@example.com"));
        assert!(formatted.contains("b@example.com"));
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("Please find today's ChemTank report attached and below."));
        assert!(formatted.contains("<html><body>tables</body></html>"));
        assert!(formatted.contains("DailyReport_2026-10-18.csv"));
        assert!(formatted.contains("text/csv"));
    }
}
