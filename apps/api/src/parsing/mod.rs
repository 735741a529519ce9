// Resume parsing pipeline.
// Implements: skill catalog, contact extraction, name cascade, skill matching, education snippets.
// Every extractor is a pure function of its input plus read-only catalog state.

pub mod catalog;
pub mod contact;
pub mod education;
pub mod entities;
pub mod handlers;
pub mod name;
pub mod normalize;
pub mod resume;
pub mod skills;
