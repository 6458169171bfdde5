mod building_handler;
mod construction_handler;
mod error;
mod views;
mod village_handler;

pub use building_handler::*;
pub use construction_handler::*;
pub use error::ApiError;
pub use views::*;
pub use village_handler::*;
