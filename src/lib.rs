// newscheck: label news text as fake or real behind a small web form.
//
// This is the library root. Each module corresponds to one subsystem;
// the binary in main.rs wires them together.

pub mod classifier;
pub mod config;
pub mod output;
pub mod smoke;
pub mod web;
