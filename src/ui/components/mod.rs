pub mod album_grid;
pub mod header;
pub mod spinner;
pub mod toast;
