mod binding;
mod state;

pub use binding::{InputBinding, InputSource};
pub use state::{InputButtons, InputState};
