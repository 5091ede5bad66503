pub mod error;
pub mod pool;
pub mod schema;
pub mod seed;
pub mod test_utils;

pub use pool::{begin_immediate, connect, initialize};
