pub mod units;

pub use units::{bytes_to_mb, format_number, BYTES_PER_MB};
