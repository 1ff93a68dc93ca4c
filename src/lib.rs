//! PhotoBooth: upload photos through a form, store them on local disk, and
//! list them in a gallery.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod requests;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;
