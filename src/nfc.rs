mod forwarder;
mod reader;
mod uid;

pub use forwarder::*;
pub use reader::*;
pub use uid::*;
