//! External decoder capability and its yt-dlp implementation

pub mod backend;
pub mod ytdlp;

pub use backend::*;
pub use ytdlp::*;
