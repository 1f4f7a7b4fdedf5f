// Request handlers, one module per concern.

pub mod check;
pub mod errors;
pub mod pages;
