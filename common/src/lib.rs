pub mod io;
pub mod utils;

pub use crate::io::open_stats;
pub use crate::utils::Timer;
