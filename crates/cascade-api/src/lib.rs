//! # cascade-api
//!
//! The result session manager: request translation, snapshot capture, and
//! the HTTP surface over the external influence engine.
//!
//! | Module        | Responsibility                                         |
//! |---------------|--------------------------------------------------------|
//! | [`translate`] | validate + dispatch one engine call per request, capture snapshots, shape responses |
//! | [`truncate`]  | convergence truncation of stepped simulations          |
//! | [`error`]     | Validation / NotFound / Engine taxonomy → status + `{"error": msg}` |
//! | [`routes`]    | axum `Router` and handlers                             |
//! | [`metrics`]   | lock-free operation counters for `/api/stats`          |

pub mod error;
pub mod metrics;
pub mod routes;
pub mod translate;
pub mod truncate;

pub use error::ApiError;
pub use metrics::OperationMetrics;
pub use routes::{router, AppState};
pub use translate::Translator;
