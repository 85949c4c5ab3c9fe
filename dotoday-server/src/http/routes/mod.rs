//! Route handlers organized by resource

pub mod health;
pub mod lists;
pub mod sync;
pub mod tasks;
