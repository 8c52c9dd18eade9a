//! Row cursor shared by every table screen and chooser.

mod traits;

pub use traits::Picker;
