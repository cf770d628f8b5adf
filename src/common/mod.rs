//! Common, shared types.

pub mod palette;
pub mod scale;
pub mod side;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
