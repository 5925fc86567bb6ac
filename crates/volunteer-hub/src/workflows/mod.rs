pub mod dashboard;
pub mod events;
pub mod ideas;
pub mod import;
pub mod matching;
pub mod normalizer;
pub mod roster;
pub mod tasks;
