pub mod buildings;
pub mod construction;
pub mod resources;
pub mod village;
