pub mod budget;
pub mod rates;
pub mod settings;
pub mod wallet;
