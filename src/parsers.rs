pub(crate) mod frame_table;

pub use frame_table::parse_frame;
