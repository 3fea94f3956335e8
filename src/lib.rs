pub mod cs;

pub use cs::compression::{PrefixCode, PrefixCoder};
pub use cs::error::{Error, Result};
