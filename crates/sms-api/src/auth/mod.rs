pub mod jwt;
pub mod middleware;
pub mod roles;
pub mod routes;
pub mod service;

pub use middleware::AuthUser;
pub use roles::Role;
