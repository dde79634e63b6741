pub mod analyze;
pub mod config;
pub mod export;
pub mod regions;
pub mod summary;
pub mod util;

pub use analyze::*;
pub use config::*;
pub use export::*;
pub use regions::*;
pub use summary::*;
pub use util::*;
