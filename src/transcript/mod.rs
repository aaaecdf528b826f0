pub mod srt;

pub use srt::{SrtTranscriber, SubtitleBlock};
