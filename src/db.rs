use anyhow::{Context as _, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tiberius::{AuthMethod, Client, Config, Row};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt as _};

use crate::tank::TankReading;

pub type DbClient = Client<Compat<TcpStream>>;

#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub server: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub trust_cert: bool,
}

pub async fn connect(options: &ConnectOptions) -> Result<DbClient> {
    let mut config = Config::new();
    config.host(&options.server);
    config.port(options.port);
    config.database(&options.database);
    config.authentication(AuthMethod::sql_server(&options.user, &options.password));
    if options.trust_cert {
        config.trust_cert();
    }

    let tcp = TcpStream::connect(config.get_addr())
        .await
        .with_context(|| format!("failed to open TCP connection to {}", config.get_addr()))?;
    tcp.set_nodelay(true)
        .context("failed to set TCP_NODELAY")?;

    Client::connect(config, tcp.compat_write())
        .await
        .context("failed to log in to SQL Server")
}

// Earliest reading per tank at or after the cutoff on the given day. ISO tanks
// come first, then tanks are ordered by the digit their code ends with.
const FIRST_READINGS_QUERY: &str = r#"
SELECT TankCode,
       TRY_CAST(WeightValue AS FLOAT) AS WeightValue,
       TRY_CAST(LevelValue AS FLOAT) AS LevelValue,
       TRY_CAST(TempValue AS FLOAT) AS TempValue,
       CAST(CapDate AS DATETIME2) AS CapDate
FROM (
    SELECT TankCode, WeightValue, LevelValue, TempValue, CapDate,
           ROW_NUMBER() OVER (PARTITION BY TankCode ORDER BY CapDate ASC) AS rn
    FROM ChemTankReadings
    WHERE CAST(CapDate AS DATE) = @P1
      AND CAST(CapDate AS TIME) >= @P2
) t
WHERE rn = 1
ORDER BY
    CASE WHEN TankCode LIKE 'ISO%' THEN 1 ELSE 2 END,
    TRY_CAST(RIGHT(TankCode, 1) AS INT)
"#;

pub async fn fetch_first_readings(
    client: &mut DbClient,
    date: NaiveDate,
    cutoff: NaiveTime,
) -> Result<Vec<TankReading>> {
    let rows = client
        .query(FIRST_READINGS_QUERY, &[&date, &cutoff])
        .await
        .context("failed to execute tank readings query")?
        .into_first_result()
        .await
        .context("failed to fetch tank readings")?;

    rows.iter()
        .map(|row| reading_from_row(row).context("failed to decode tank reading row"))
        .collect()
}

fn reading_from_row(row: &Row) -> Result<TankReading> {
    let tank_code = row
        .try_get::<&str, _>("TankCode")?
        .ok_or_else(|| anyhow!("TankCode is NULL"))?
        .to_string();
    let captured_at = row
        .try_get::<NaiveDateTime, _>("CapDate")?
        .ok_or_else(|| anyhow!("CapDate is NULL for tank {tank_code}"))?;

    Ok(TankReading {
        weight: row.try_get::<f64, _>("WeightValue")?,
        level: row.try_get::<f64, _>("LevelValue")?,
        temperature: row.try_get::<f64, _>("TempValue")?,
        tank_code,
        captured_at,
    })
}
