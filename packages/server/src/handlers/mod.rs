pub mod challenge;
pub mod evaluation;
pub mod parse;
pub mod participant;
pub mod submission;
pub mod team;
