//! Console error types

use fbterm_video::VideoError;

/// Console result type
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Console error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// Font blob is not exactly one glyph table (256 x 16 bytes)
    FontBlobSize,
    /// Font scale of zero would produce degenerate cell geometry
    ZeroScale,
    /// Screen would have zero columns or rows at the requested scale
    DegenerateGeometry,
    /// Framebuffer geometry is invalid
    Video(VideoError),
}

impl From<VideoError> for ConsoleError {
    fn from(err: VideoError) -> Self {
        ConsoleError::Video(err)
    }
}
