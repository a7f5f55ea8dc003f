//! Statistical summaries for streaming data
//!
//! This module provides a reversible moments accumulator and a fixed-capacity
//! sliding window built on it. Both update in O(1) per value.
//!
//! # Example
//!
//! ```
//! use flowguard::statistics::SlidingWindow;
//!
//! let mut window = SlidingWindow::new(50).unwrap();
//!
//! for i in 0..1_000 {
//!     window.push((i % 10) as f64).unwrap();
//! }
//!
//! let stats = window.statistics().unwrap();
//! println!("Mean: {}", stats.mean);
//! println!("Stddev: {}", stats.stddev);
//! ```

mod moments;
mod window;

pub use moments::Moments;
pub use window::{SlidingWindow, WindowStats};
