pub mod downloads;
pub mod help;
pub mod history;
pub mod memories;
pub mod signwall;
