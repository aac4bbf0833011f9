pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
