//! Scoring module - points for rows cleared by a single landing
//!
//! The first row of a landing is worth [`LINE_CLEAR_BASE`]. Every further row
//! in the same landing is worth 1.5x the row before it, and the row values are
//! summed: 1000, 1000 + 1500, 1000 + 1500 + 2250, ...

use crate::types::{CHAIN_DENOMINATOR, CHAIN_NUMERATOR, LINE_CLEAR_BASE};

/// Points for clearing `rows` rows with one landing.
///
/// # Examples
///
/// ```
/// use blockdrop_core::calculate_clear_score;
///
/// assert_eq!(calculate_clear_score(0), 0);
/// assert_eq!(calculate_clear_score(1), 1000);
/// assert_eq!(calculate_clear_score(2), 2500);
/// assert_eq!(calculate_clear_score(3), 4750);
/// ```
pub fn calculate_clear_score(rows: usize) -> u64 {
    let mut running: u64 = 0;
    let mut total: u64 = 0;
    for _ in 0..rows {
        running = if running == 0 {
            LINE_CLEAR_BASE
        } else {
            running * CHAIN_NUMERATOR / CHAIN_DENOMINATOR
        };
        total += running;
    }
    total
}
