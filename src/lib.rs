#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]

pub mod board;
pub mod config;
pub mod conflict;
pub mod random;
pub mod solver;
#[cfg(feature = "visualize")]
pub mod visualize;
