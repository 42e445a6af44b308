//! Load resultants applied to a laminate

mod load_state;

pub use load_state::LoadState;
