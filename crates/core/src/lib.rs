#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod time;

pub use error::Error;
pub use time::Clock;
