use thiserror::Error;

/// Errors that can occur on the host side of the shading core. The shaders
/// themselves have no error channel; malformed data renders wrong, it does
/// not fault.
#[derive(Debug, Error)]
pub enum BrumeError {
    #[error("GPU adapter not found: {0}")]
    AdapterNotFound(String),

    #[error("Failed to request GPU device: {0}")]
    DeviceRequestFailed(String),

    #[error("Frame readback failed: {0}")]
    ReadbackFailed(String),

    #[error("Report I/O failed: {0}")]
    ReportIo(String),
}
