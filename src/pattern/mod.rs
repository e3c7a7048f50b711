//! The usage-pattern engine: option descriptions, the usage grammar, the
//! argv lexer and the matcher that unifies them.

pub mod argv_lexer;
mod error;
pub mod leaf;
pub mod option_lexer;
pub mod option_parser;
pub mod pattern_fixer;
pub mod pattern_matcher;
pub mod pattern_parser;
pub mod token_stream;
pub mod tree;
pub mod usage;

pub use error::*;
