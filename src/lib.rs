//! Derive a command-line argument parser from a human-readable usage message.
//!
//! ```
//! use docopt_pattern::docopt;
//!
//! let doc = "Usage: prog [-v] <file>...";
//! let args = docopt(doc, ["-v", "a.txt", "b.txt"]).unwrap();
//! assert!(args.get_bool("-v"));
//! assert_eq!(args.get_list("<file>"), ["a.txt", "b.txt"]);
//! ```

pub mod config;
mod docopt;
pub mod pattern;

pub use docopt::{ArgvMap, Docopt, docopt};
pub use pattern::DocoptError;
