pub mod dataset;
pub mod session;
