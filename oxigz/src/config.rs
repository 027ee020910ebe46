//! Configuration for the file-to-file pipeline.

use oxigz_core::error::{GzError, Result};
use oxigz_core::CompressionLevel;

/// Default number of bytes moved per pipeline step.
pub const DEFAULT_CHUNK_SIZE: usize = 65535;

/// Pipeline configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Bytes read and written per step.
    pub chunk_size: usize,
    /// Compression level for gzip output.
    pub level: CompressionLevel,
}

impl PipelineConfig {
    /// 64K chunks at the default compression level.
    pub const DEFAULT: Self = Self {
        chunk_size: DEFAULT_CHUNK_SIZE,
        level: CompressionLevel::DEFAULT,
    };

    /// Smallest output, slowest.
    pub const BEST: Self = Self {
        chunk_size: DEFAULT_CHUNK_SIZE,
        level: CompressionLevel::BEST,
    };

    /// Fastest compression.
    pub const FAST: Self = Self {
        chunk_size: DEFAULT_CHUNK_SIZE,
        level: CompressionLevel::FAST,
    };

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the compression level.
    pub fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Check that the configuration can drive a pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(GzError::invalid_argument("chunk size must be positive"));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let config = PipelineConfig::default();
        assert_eq!(config.chunk_size, 65535);
        assert!(config.level.is_default());
        assert_eq!(PipelineConfig::BEST.level.value(), 9);
        assert_eq!(PipelineConfig::FAST.level.value(), 1);
    }

    #[test]
    fn test_builders_and_validate() {
        let config = PipelineConfig::DEFAULT
            .with_chunk_size(512)
            .with_level(CompressionLevel::NONE);
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.level, CompressionLevel::NONE);
        assert!(config.validate().is_ok());

        let err = config.with_chunk_size(0).validate().unwrap_err();
        assert!(matches!(err, GzError::InvalidArgument { .. }));
    }
}
