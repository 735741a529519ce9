// Job matching.
// Implements: the read-only job board and skill-overlap scoring against it.

pub mod handlers;
pub mod jobs;
pub mod matcher;
