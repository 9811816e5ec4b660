#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod files;
pub mod json;
pub mod log;

pub use files::{FileError, JsonFiles, Store};
