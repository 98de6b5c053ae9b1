mod scope_board;

pub use scope_board::{ScopeBoard, SlotState};
