pub mod app;
pub mod compile;
pub mod data;
pub mod filter;
pub mod model;
pub mod util;
