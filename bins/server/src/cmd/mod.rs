pub mod handler;
pub mod serve;
