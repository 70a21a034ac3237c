// src/morse/mod.rs  —  Timing, message model, encoder
pub mod encoder;
pub mod message;
pub mod timing;

pub use encoder::encode;
pub use message::{EncodedChar, EncodedMessage, EncodedWord};
pub use timing::Timing;
