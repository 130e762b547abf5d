//! Pure series transforms the aggregator applies after every load: blending
//! a partial live bucket into an estimate, and backfilling leading zeros so
//! the charted window has no gaps.

mod backfill;
mod blend;

pub use backfill::backfill_zeros;
pub use blend::blend_live;
