pub mod routes;

pub use routes::{bind, routes, serve};
