pub mod clause;
pub mod contract;
pub mod schema;
pub mod summary;
pub mod tone;

pub use clause::{ClauseMatch, ClauseRecord, find_clauses, find_keywords};
pub use contract::{ContractRecord, ContractType, ParseError, Section};
pub use schema::TableLayout;
pub use summary::summarize;
pub use tone::{Tone, label_tone};
