pub mod error;
pub mod jtl;
pub mod results;
pub mod stats;

pub use error::{JtlError, JtlStatError};
