mod components;
mod theme;
mod ui;

pub use ui::render;
