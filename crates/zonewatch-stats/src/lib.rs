//! Statistical utilities for the Zonewatch project.
//!
//! - [`descriptive`]: Summary statistics (mean, median, spread) of a sample
//! - [`density`]: Gaussian kernel density estimation on a regular 2D grid
//!
//! # Examples
//!
//! ```
//! use zonewatch_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([30.0, 45.0, 60.0]).unwrap();
//! assert_eq!(stats.mean, 45.0);
//! ```

pub mod density;
pub mod descriptive;
