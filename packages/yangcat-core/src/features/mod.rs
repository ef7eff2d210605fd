//! Feature modules
//!
//! Parsing follows the domain/ports/infrastructure split; the remaining
//! features are flat slices built on top of it:
//! - resolvers, record_builder: statement tree → catalog record
//! - locator, dependency_walker: include/import closure on disk
//! - cache: content hashes and the unparsable registry
//! - sources: vendor capability documents, yang-library, IANA registry
//! - catalog: the keyed in-memory catalog and its outputs

pub mod cache;
pub mod catalog;
pub mod compilation;
pub mod dependency_walker;
pub mod locator;
pub mod parsing;
pub mod record_builder;
pub mod resolvers;
pub mod scm;
pub mod sources;
