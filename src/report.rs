mod csv;
mod html;
mod mail;

pub use self::csv::*;
pub use html::*;
pub use mail::*;
