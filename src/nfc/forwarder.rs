use std::time::Duration;

use tracing::{debug, info, warn};

use crate::nfc::{CardReader, Notifier, ReadError, Uid, UidSink};

const NOT_WRITTEN_MESSAGE: &str = "UID READ successfully\nBUT NOT WRITTEN in software!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTimings {
    pub no_card: Duration,
    pub bad_status: Duration,
    pub after_read: Duration,
}

impl Default for PollTimings {
    fn default() -> Self {
        Self {
            no_card: Duration::from_millis(300),
            bad_status: Duration::from_millis(500),
            after_read: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    NoCard,
    ReaderFailed,
    BadStatus { sw1: u8, sw2: u8 },
    Duplicate(Uid),
    Sent(Uid),
    WriteFailed(Uid),
    Invalid(Uid),
}

pub struct Forwarder<R, S, N> {
    reader: R,
    sink: S,
    notifier: N,
    timings: PollTimings,
    last_uid: Option<Uid>,
}

impl<R, S, N> Forwarder<R, S, N>
where
    R: CardReader,
    S: UidSink,
    N: Notifier,
{
    pub fn new(reader: R, sink: S, notifier: N, timings: PollTimings) -> Self {
        Self {
            reader,
            sink,
            notifier,
            timings,
            last_uid: None,
        }
    }

    pub fn last_uid(&self) -> Option<&Uid> {
        self.last_uid.as_ref()
    }

    /// Runs one read cycle against the reader.
    ///
    /// A tag left on the reader is only forwarded once; it has to leave the
    /// field before the same UID is accepted again.
    pub fn poll_once(&mut self) -> PollOutcome {
        let response = match self.reader.read_uid() {
            Ok(r) => r,
            Err(ReadError::NoCard) => {
                self.last_uid = None;
                return PollOutcome::NoCard;
            }
            Err(err) => {
                warn!("{err}");
                return PollOutcome::ReaderFailed;
            }
        };

        if !response.is_success() {
            debug!(
                "GET UID rejected: sw1=0x{:02X} sw2=0x{:02X}",
                response.sw1, response.sw2
            );
            return PollOutcome::BadStatus {
                sw1: response.sw1,
                sw2: response.sw2,
            };
        }

        let uid = Uid::from_bytes(&response.data);
        info!(%uid, "UID read");

        if self.last_uid.as_ref() == Some(&uid) {
            warn!(%uid, "duplicate UID, not forwarded");
            self.notifier.notify("NFC Duplicate", NOT_WRITTEN_MESSAGE);
            return PollOutcome::Duplicate(uid);
        }

        self.last_uid = Some(uid.clone());

        if !uid.is_valid() {
            warn!(%uid, "invalid UID format");
            self.notifier.notify(
                "Invalid UID",
                &format!("Invalid UID Format Detected:\n{uid}"),
            );
            return PollOutcome::Invalid(uid);
        }

        match self.sink.deliver(&uid) {
            Ok(()) => {
                info!(%uid, "UID sent");
                PollOutcome::Sent(uid)
            }
            Err(err) => {
                warn!(%uid, "failed to write UID: {err:#}");
                self.notifier.notify("NFC Write Error", NOT_WRITTEN_MESSAGE);
                PollOutcome::WriteFailed(uid)
            }
        }
    }

    pub fn delay_after(&self, outcome: &PollOutcome) -> Duration {
        match outcome {
            PollOutcome::NoCard | PollOutcome::ReaderFailed => self.timings.no_card,
            PollOutcome::BadStatus { .. } => self.timings.bad_status,
            PollOutcome::Duplicate(_)
            | PollOutcome::Sent(_)
            | PollOutcome::WriteFailed(_)
            | PollOutcome::Invalid(_) => self.timings.after_read,
        }
    }

    pub fn run(&mut self) -> ! {
        loop {
            let outcome = self.poll_once();
            std::thread::sleep(self.delay_after(&outcome));
        }
    }
}
