pub mod build_info;
pub mod coefficients;
pub mod demo_args;
pub mod error;
pub mod field;
pub mod filter;
pub mod image;
pub mod lags;
pub mod util;
