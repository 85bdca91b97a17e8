// Inspection call lifecycle
pub mod inspection_calls;
pub mod inspection_store;
pub mod sequence;
pub mod stage_validator;

pub use inspection_calls::InspectionCallService;
