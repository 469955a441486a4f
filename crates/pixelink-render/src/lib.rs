//! Pixelink Render Library
//!
//! Paint sink implementations for Pixelink. The default sink is an in-memory
//! RGBA framebuffer used by the headless shell and tests.

mod framebuffer;

pub use framebuffer::FrameBuffer;
