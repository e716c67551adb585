//! fbterm Video Primitives
//!
//! Linear framebuffer access for the boot-stage text console.
//! Provides a backend trait with bounds-checked drawing primitives
//! and a raw-pointer implementation for bootloader-provided memory.

#![no_std]

pub mod color;
pub mod framebuffer;

pub use color::Color;
pub use framebuffer::{Framebuffer, FramebufferInfo, SimpleFramebuffer, VideoError};
