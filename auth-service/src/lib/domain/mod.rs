pub mod credentials;
pub mod errors;
pub mod tenant;
pub mod user;
