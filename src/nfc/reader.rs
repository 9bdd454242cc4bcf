use thiserror::Error;

use crate::nfc::Uid;

// PC/SC pseudo-APDU: GET DATA, UID of the card in the field.
pub const GET_UID_APDU: [u8; 5] = [0xFF, 0xCA, 0x00, 0x00, 0x00];

pub const SW1_SUCCESS: u8 = 0x90;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardResponse {
    pub data: Vec<u8>,
    pub sw1: u8,
    pub sw2: u8,
}

impl CardResponse {
    /// Splits a raw response APDU into its body and trailing status words.
    pub fn from_raw(raw: &[u8]) -> Option<Self> {
        let [data @ .., sw1, sw2] = raw else {
            return None;
        };

        Some(Self {
            data: data.to_vec(),
            sw1: *sw1,
            sw2: *sw2,
        })
    }

    pub fn is_success(&self) -> bool {
        self.sw1 == SW1_SUCCESS
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("no card in the reader field")]
    NoCard,
    #[error("card reader failure: {0:#}")]
    Reader(#[from] anyhow::Error),
}

/// Sends the GET UID command to whatever card is in the field.
pub trait CardReader {
    fn read_uid(&mut self) -> Result<CardResponse, ReadError>;
}

/// Hands a UID over to the application that currently has focus.
pub trait UidSink {
    fn deliver(&mut self, uid: &Uid) -> anyhow::Result<()>;
}

pub trait Notifier {
    fn notify(&mut self, title: &str, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, title: &str, message: &str) {
        (**self).notify(title, message);
    }
}
