pub mod core;

#[cfg(feature = "sys")]
mod sys;
