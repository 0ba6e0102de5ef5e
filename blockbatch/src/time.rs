//! Time budgets for work spread across host ticks.

#[doc(inline)]
pub use blockbatch_base::time::*;
