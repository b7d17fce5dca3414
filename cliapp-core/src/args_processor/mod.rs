//! Token binding.
//!
//! [`bind`] fills a single record from tokens; [`ArgsProcessor`] binds a
//! handler's full parameter list, delegating records to [`bind`].

mod binder;
mod processor;

pub use binder::bind;
pub use processor::ArgsProcessor;
