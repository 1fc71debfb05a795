//! Counter middleware
//!
//! Installed after `LoggingMiddleware` from `redux-core`, in this order:
//! quit → doubling → limit

pub mod doubling;
pub mod limit;
pub mod quit;

pub use doubling::DoublingMiddleware;
pub use limit::LimitMiddleware;
pub use quit::QuitMiddleware;
