pub mod platform;
pub mod probe;
pub mod runtime;
