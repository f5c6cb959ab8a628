pub mod emulated;

pub mod traits;

pub(crate) mod utils;
