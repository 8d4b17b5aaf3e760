//! Application module: the model rendered by the UI and mutated by the
//! event loop.

mod model;

pub use model::*;
