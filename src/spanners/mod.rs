//! Spanners: directives over contiguous runs of leaves
//!
//! The spanner record lives in the score's arena next to the components.
//! Construction goes through [`crate::score::Score::attach`], edits through
//! [`SpannerMut`], and formatting through [`FormatContributor`].

pub mod contributor;
pub mod kinds;
pub mod operations;
pub mod receipt;
pub mod spanner;

pub use contributor::{FormatContributor, FormatSlot, SlotContributions};
pub use kinds::SpannerKind;
pub use operations::SpannerMut;
pub use receipt::{FractureReceipt, FractureSide, FuseReceipt};
pub use spanner::{Spanner, SpannerState};
