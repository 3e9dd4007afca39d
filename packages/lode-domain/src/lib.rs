pub mod highlight;
pub mod relevance;
pub mod similarity;

pub use relevance::{LexicalScorer, RelevanceScorer};
