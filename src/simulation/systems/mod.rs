pub mod cycles;
pub mod events;
pub mod logging;
pub mod supply;

pub use cycles::*;
pub use events::*;
pub use logging::*;
pub use supply::*;
