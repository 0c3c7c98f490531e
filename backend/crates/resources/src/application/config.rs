//! Resource library configuration

/// 20 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Slack for JSON framing around the base64 file content
const REQUEST_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ResourceConfig {
    /// Largest accepted file, decoded
    pub max_upload_bytes: usize,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ResourceConfig {
    /// Request body limit for uploads: base64 grows data by 4/3.
    pub fn max_request_bytes(&self) -> usize {
        self.max_upload_bytes.div_ceil(3) * 4 + REQUEST_OVERHEAD_BYTES
    }
}
