//! titanic-api - Natural language Q&A over the Titanic passenger dataset.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod agent;
pub mod dataset;
pub mod response;
pub mod routes;
pub mod viz;

pub use dataset::{ColumnStats, ColumnType, Dataset, Value};
pub use response::{Answer, AskRequest, AskResponse};
pub use routes::{build_router, AppState};
