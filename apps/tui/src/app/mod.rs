// App module for the site previewer
// Holds view state and maps keys onto it

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, Overlay};
