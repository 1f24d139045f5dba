//! Basic matrix-like datastructures.

pub mod dense;
pub mod sparse;
pub mod traits;

/// Prelude containing basic matrix-like structures and traits.
#[allow(unused_imports)]
pub mod prelude {
    pub use super::dense::*;
    pub use super::sparse::*;
    pub use super::traits::*;
}
