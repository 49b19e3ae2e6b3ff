#[path = "../common/mod.rs"]
mod common;

mod aero_table_tests;
mod config_tests;
mod simulation_tests;
mod trim_tests;
