//! The variable store that outlives a single line, and the values kept in it.

pub mod environment;
pub mod value;

pub mod prelude {
    pub use super::{
        environment::*,
        value::*
    };
}
