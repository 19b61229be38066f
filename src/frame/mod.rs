//! Byte and text layout shared by the content and name ciphers.
//!
//! Nothing in here touches key material: the frames only concatenate and split
//! fixed-offset regions, and [`text`] maps bytes to a filename-safe alphabet.

pub mod content;
pub mod name;
pub mod text;

pub use content::ContentFrame;
pub use name::{NameFrame, pad_nonce};
pub use text::is_encrypted_name;
