//! Property tests for facet merging and relationship traversal.

mod facet_merge;
mod traversal;
