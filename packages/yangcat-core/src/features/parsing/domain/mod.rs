//! Parsing domain models

mod statement;
mod statement_tree;

pub use statement::Statement;
pub use statement_tree::StatementTree;
