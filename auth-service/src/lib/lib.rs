pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub mod proto {
    tonic::include_proto!("auth");
}

pub use domain::credentials;
pub use domain::tenant;
pub use domain::user;
pub use outbound::repositories;
