mod iterator;
mod sampling;
pub(crate) mod utils;
