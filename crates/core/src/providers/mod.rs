pub mod backend;
pub mod cbu;
