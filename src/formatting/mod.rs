pub mod listings;
pub mod table;
pub mod utils;

pub use table::{Cell, RenderConfig, Renderer, Style, Table};
pub use utils::{display_width, pad_right, truncate};
