mod advance_village;
mod cancel_construction;
mod found_village;
mod start_construction;

pub use advance_village::AdvanceVillageCommandHandler;
pub use cancel_construction::CancelConstructionCommandHandler;
pub use found_village::FoundVillageCommandHandler;
pub use start_construction::StartConstructionCommandHandler;
