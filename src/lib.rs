pub mod db;
pub mod logging;
pub mod nfc;
pub mod report;
pub mod tank;
