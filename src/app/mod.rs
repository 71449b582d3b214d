// Presentation helpers: turn a projection into something a person can read.

pub mod report;
