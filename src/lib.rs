//! Compare two revisions of a GraphQL schema, classify every structural
//! difference as breaking or dangerous, and anchor each finding to a
//! source line for a commit check report.

pub mod analysis;
pub mod change;
pub mod config;
pub mod describe;
pub mod diff;
pub mod fetch;
pub mod locate;
pub mod schema;
