pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod images;
pub mod pagination;
pub mod payments;
pub mod response;
pub mod state;
pub mod storage;

#[cfg(test)]
mod testing;
