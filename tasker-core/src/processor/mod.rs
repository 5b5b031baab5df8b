//! Task processors
//!
//! - [`TaskProcessor`] trait, also implemented by plain closures
//! - [`CompletionProcessor`], the default that completes every task
//! - [`HandlerRegistry`], routing by task type

pub mod completion;
pub mod registry;
pub mod traits;

pub use completion::CompletionProcessor;
pub use registry::HandlerRegistry;
pub use traits::TaskProcessor;
