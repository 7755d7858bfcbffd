pub mod tts;
pub use tts::TTSEngine;
