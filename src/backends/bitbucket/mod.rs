mod http;
mod models;

#[cfg(test)]
mod tests;

pub use http::*;
pub use models::*;
