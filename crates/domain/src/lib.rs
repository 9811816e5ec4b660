#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod constraints;
mod edit;
mod equipment;
mod error;
mod exercise;
mod generator;
mod history;
mod plan;
mod service;

pub use catalog::*;
pub use constraints::*;
pub use equipment::*;
pub use error::*;
pub use exercise::*;
pub use generator::*;
pub use history::*;
pub use plan::*;
pub use service::*;
