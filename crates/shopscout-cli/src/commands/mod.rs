//! CLI command implementations

pub mod extract;
pub mod plan;
pub mod search;
pub mod similar;
