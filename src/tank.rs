mod group;
mod reading;

pub use group::*;
pub use reading::*;
