//! Shared partial stylesheets.
//!
//! Every partial is declared with [`stylecomp::partial!`] and built on first
//! access. Colors always go through theme tokens.

mod buttons;
mod inputs;
mod spinner;
mod tooltips;

pub use buttons::buttons;
pub use inputs::inputs;
pub use spinner::spinner;
pub use tooltips::tooltips;

/// Import paths of every shared partial, in the order components usually
/// compose them.
pub const ALL: [&str; 4] = [
    buttons::ID,
    inputs::ID,
    tooltips::ID,
    spinner::ID,
];
