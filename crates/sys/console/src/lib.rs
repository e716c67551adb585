//! fbterm Console
//!
//! A no_std text console for the early boot stage: bitmap font storage,
//! scaled glyph rendering, cursor/control-character handling, scrolling,
//! and numeric text formatting.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Console                                                     │
//! │  - Cursor state machine, control characters, scrolling      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Renderer                                                    │
//! │  - Scaled glyph rasterization, caret                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FontStore                                                   │
//! │  - 256-glyph 8x16 table: blob / builtin / legacy loading    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Framebuffer (trait, fbterm-video)                           │
//! │  - Bounds-checked fill_rect, overlap-safe scroll            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Console` value owns all state; callers that want a single
//! boot-wide console can use the spin-locked global in this module and
//! the `print!`/`println!` macros.

#![no_std]

pub mod console;
pub mod error;
pub mod fmt;
pub mod font;
mod font_data;
pub mod renderer;

pub use console::{Console, TAB_SIZE};
pub use error::{ConsoleError, ConsoleResult};
pub use fmt::{format_bytes, format_float, format_unsigned};
pub use font::{ClassicFont, FontStore, GLYPH_COUNT, GLYPH_HEIGHT, GLYPH_TABLE_SIZE, GLYPH_WIDTH};
pub use renderer::Renderer;

use fbterm_video::SimpleFramebuffer;
use spin::Mutex;

/// Global console instance
static CONSOLE: Mutex<Option<Console<SimpleFramebuffer>>> = Mutex::new(None);

/// Initialize the global console over bootloader-provided framebuffer
/// memory at the given font scale
pub fn init(fb: SimpleFramebuffer, scale: u32) -> ConsoleResult<()> {
    let console = Console::new(fb, scale)?;
    *CONSOLE.lock() = Some(console);
    Ok(())
}

/// Run a closure against the global console, if initialized
pub fn with_console<R>(f: impl FnOnce(&mut Console<SimpleFramebuffer>) -> R) -> Option<R> {
    CONSOLE.lock().as_mut().map(f)
}

#[doc(hidden)]
pub fn _print(args: core::fmt::Arguments) {
    use core::fmt::Write;
    if let Some(console) = CONSOLE.lock().as_mut() {
        let _ = console.write_fmt(args);
    }
}

/// Print formatted text to the global console
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::_print(core::format_args!($($arg)*))
    };
}

/// Print formatted text plus a newline to the global console
#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($($arg:tt)*) => {
        $crate::print!("{}\n", core::format_args!($($arg)*))
    };
}
