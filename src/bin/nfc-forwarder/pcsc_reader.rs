use std::ffi::CString;

use anyhow::{Context as _, anyhow};
use pcsc::{Context, Error, Protocols, Scope, ShareMode};
use plant_automation::nfc::{CardReader, CardResponse, GET_UID_APDU, ReadError};

pub struct PcscReader {
    context: Context,
    reader: CString,
}

impl PcscReader {
    /// Picks the first reader, or the first one whose name contains `filter`.
    pub fn open(filter: Option<&str>) -> anyhow::Result<Self> {
        let context =
            Context::establish(Scope::User).context("failed to establish PC/SC context")?;

        let readers = context
            .list_readers_owned()
            .context("failed to list PC/SC readers")?;

        let reader = readers
            .into_iter()
            .find(|r| match filter {
                Some(f) => r.to_string_lossy().contains(f),
                None => true,
            })
            .ok_or_else(|| match filter {
                Some(f) => anyhow!("no NFC reader matching {f:?} found"),
                None => anyhow!("no NFC reader found"),
            })?;

        Ok(Self { context, reader })
    }

    pub fn name(&self) -> String {
        self.reader.to_string_lossy().into_owned()
    }
}

impl CardReader for PcscReader {
    fn read_uid(&mut self) -> Result<CardResponse, ReadError> {
        let card = match self
            .context
            .connect(&self.reader, ShareMode::Shared, Protocols::ANY)
        {
            Ok(card) => card,
            Err(Error::NoSmartcard | Error::RemovedCard) => return Err(ReadError::NoCard),
            Err(err) => {
                return Err(anyhow!(err)
                    .context(format!("failed to connect to card in {}", self.name()))
                    .into());
            }
        };

        let mut buf = [0u8; pcsc::MAX_BUFFER_SIZE];
        let raw = match card.transmit(&GET_UID_APDU, &mut buf) {
            Ok(raw) => raw,
            Err(Error::RemovedCard) => return Err(ReadError::NoCard),
            Err(err) => {
                return Err(anyhow!(err).context("failed to transmit GET UID").into());
            }
        };

        CardResponse::from_raw(raw)
            .ok_or_else(|| anyhow!("truncated GET UID response: {raw:02X?}").into())
    }
}
