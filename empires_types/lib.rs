pub mod buildings;
pub mod common;
