pub mod catalog;
pub mod classifier;
pub mod distance_table;
pub mod error;
pub mod finger_state;
pub mod geometry;
pub mod gestures;
pub mod landmark;
pub mod mudra_info;

#[cfg(test)]
pub(crate) mod fixtures;
