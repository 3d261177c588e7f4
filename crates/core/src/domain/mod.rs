pub mod account;
pub mod contract;
pub mod profile;
pub mod recommendation;
pub mod risk;
pub mod summary;
