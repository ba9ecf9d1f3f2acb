// Library root for the one-on-one fantasy core: domain model, configuration,
// and the contracts for the stat provider and game record store.

pub mod config;
pub mod db;
pub mod model;
pub mod provider;
pub mod store;
