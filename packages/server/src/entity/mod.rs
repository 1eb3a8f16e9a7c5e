pub mod challenge;
pub mod evaluation;
pub mod participant;
pub mod participant_team;
pub mod submission;
pub mod team;
