pub mod errors;
pub mod models;
pub mod notification;
pub mod password;
pub mod ports;
pub mod service;
