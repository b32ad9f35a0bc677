pub mod fuzzy;
pub mod matcher;
pub mod model;
pub mod parser;

pub use matcher::{match_query, LengthUnit, MatchConfig, Matcher};
pub use model::{DocumentFormat, FaqEntry, FaqTable, MatchResult};
pub use parser::{parse, parse_documents};
