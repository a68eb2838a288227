pub mod catalog;
pub mod config;
pub mod details;
pub mod opener;
pub mod selection;
pub mod state;
