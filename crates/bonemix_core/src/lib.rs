//! Bonemix Core
//!
//! Foundational types shared by every Bonemix crate:
//!
//! - [`errors`]: the engine-wide [`BonemixError`] and [`Result`] alias
//! - [`interner`]: bone-name interning into [`Symbol`]s

pub mod errors;
pub mod interner;

pub use errors::{BonemixError, Result};
pub use interner::Symbol;
