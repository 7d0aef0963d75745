//! Display helpers shared by every view of a calculation.
//!
//! Views never fail: a missing value renders as its zero equivalent.

pub mod common;

pub use common::{format_amount, format_count, join_feeding_times, round_half_up, species_label};
