pub use facade::*;
pub use feed::*;
pub use live_info::*;
pub use standings::*;
pub use telemetry::*;

mod facade;
mod feed;
mod live_info;
mod standings;
mod telemetry;
