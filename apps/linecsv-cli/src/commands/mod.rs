pub mod convert;
pub mod headers;
