//! Reporting helpers shared by every phase: source spans, rendered
//! diagnostics, the line-level error type and the warning emitters.

pub mod diagnostic;
pub mod error;
pub mod src_span;
pub mod warning;

pub mod prelude {
    pub use super::{
        diagnostic::*,
        error::*,
        src_span::*,
        warning::*
    };
}
