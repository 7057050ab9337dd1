mod daily;
mod event;
mod medal;

pub use daily::*;
pub use event::*;
pub use medal::*;
