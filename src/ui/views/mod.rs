pub mod album_detail;
pub mod home;
pub mod registration;

pub use album_detail::AlbumDetail;
pub use home::Home;
pub use registration::Registration;
