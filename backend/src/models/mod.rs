pub mod macros;
pub mod schedule;
pub mod stop;
pub mod time;

pub use schedule::*;
pub use stop::*;
pub use time::*;
