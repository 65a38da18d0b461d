//! Voice command table and transcript matching
//!
//! The table is an ordered list of navigation actions. Each action owns a set
//! of accepted phrases; a transcript selects the first action (in table order)
//! whose phrase set it contains.

mod matcher;
mod table;

pub use matcher::{matches, resolve};
pub use table::{command_table, Action, CommandEntry};
