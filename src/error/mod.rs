//! Error taxonomy for the fetch pipeline.
//!
//! The public [`Error`] wraps a boxed inner record carrying a [`Kind`], an
//! optional source error, and the URL the failure was observed for. Leaf
//! parse errors (URL decomposition) use `thiserror` enums and are wrapped
//! into the top type by the constructors in [`constructors`].

mod constructors;
mod types;

pub(crate) use constructors::{connect, decode, io, malformed, missing_redirect_target, too_many_redirects, url};
pub use types::{Error, Kind, Result};
