//! Utility functions shared across the crate.
//!
//! ## Modules
//!
//! - [`app_data`] - User configuration file and timezone lookup
//! - [`progress`] - Stage spinners (no-op without the `progress` feature)
//! - [`words`] - Space-delimited word slicing used for phrases
//!
//! ## Key Functions
//!
//! ```no_run
//! use argot::utils::k_words;
//!
//! // Skip two words, take the next two
//! let phrase = k_words("a b c d e", 2, 2);
//! // Returns: "c d"
//! ```

pub mod app_data;
pub mod progress;
pub mod words;

pub use app_data::*;
pub use words::*;
