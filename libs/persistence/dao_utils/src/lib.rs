pub mod query_helpers;

pub use query_helpers::{PgParam, PgParamBox, PgParamVec, WhereClause};
