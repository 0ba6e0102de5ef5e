//! Mathematical utilities and decisions.

#[doc(inline)]
pub use blockbatch_base::math::*;
