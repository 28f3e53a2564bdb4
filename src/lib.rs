mod convert;
mod error;
mod loader;
mod merge;
mod model;
mod tempo;
mod timeline;
mod util;

pub use convert::*;
pub use error::*;
pub use loader::*;
pub use merge::*;
pub use model::config::*;
pub use model::schedule::*;
pub use tempo::*;
pub use timeline::*;
pub use util::*;
