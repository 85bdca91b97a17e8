pub mod final_inspection_detail;
pub mod final_lot_detail;
pub mod final_process_mapping;
pub mod inspection_call;
pub mod process_inspection_detail;
pub mod process_rm_mapping;
pub mod rm_heat_quantity;
pub mod rm_inspection_detail;
pub mod sequence_counter;

pub use inspection_call::{CallStage, CallStatus};
