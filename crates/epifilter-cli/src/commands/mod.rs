pub mod boundaries;
pub mod run;
