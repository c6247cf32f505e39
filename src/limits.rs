use crate::error::{FrameError, PackError};

/// Resource limits for a pack run.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height) of any single image.
    pub max_pixels: Option<u64>,
    /// Maximum size of the whole output blob, padding and spacers included.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    /// Check one image's dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), FrameError> {
        let (width, height) = (u64::from(width), u64::from(height));
        let caps = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", width * height, self.max_pixels),
        ];
        for (what, value, cap) in caps {
            if let Some(cap) = cap.filter(|&cap| value > cap) {
                return Err(FrameError::LimitExceeded(alloc::format!(
                    "{what} {value} exceeds limit {cap}"
                )));
            }
        }
        Ok(())
    }

    /// Check that a blob of `bytes` total stays within the size limit.
    pub(crate) fn check_output(&self, bytes: u64) -> Result<(), PackError> {
        match self.max_output_bytes {
            Some(cap) if bytes > cap => Err(PackError::LimitExceeded(alloc::format!(
                "output {bytes} bytes exceeds limit {cap}"
            ))),
            _ => Ok(()),
        }
    }
}
