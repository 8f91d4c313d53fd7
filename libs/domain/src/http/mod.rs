pub mod cors;

pub use cors::{preflight, with_permissive_cors};
