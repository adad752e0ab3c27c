use std::fmt;

/// Recording status shown by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceStatus {
    /// Ready to start recording.
    #[default]
    Ready,
    /// This surface holds the gate and its timer is running.
    Recording,
    /// Another surface holds the gate.
    Blocked,
}

impl fmt::Display for SurfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SurfaceStatus::Ready => "Ready",
            SurfaceStatus::Recording => "Recording",
            SurfaceStatus::Blocked => "Recording in progress elsewhere",
        };
        f.write_str(text)
    }
}
