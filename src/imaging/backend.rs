//! Raster backend trait and shared error type.
//!
//! The [`ImageBackend`] trait defines the two producers the row driver calls
//! per item: a QR image and an info card. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::{InfoParams, QrParams};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Cannot encode {len} bytes as a QR code: {reason}")]
    QrCapacity { len: usize, reason: String },
}

/// Trait for raster backends.
pub trait ImageBackend {
    /// Encode `params.data` as a QR symbol and write it as a PNG.
    fn qr(&self, params: &QrParams) -> Result<(), BackendError>;

    /// Draw an info card and write it as a PNG.
    fn info_card(&self, params: &InfoParams) -> Result<(), BackendError>;

    /// Degradations noticed while setting up the backend (e.g. font fallback).
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records operations without drawing anything.
    #[derive(Default)]
    pub struct MockBackend {
        pub operations: Mutex<Vec<RecordedOp>>,
        /// QR calls whose data is longer than this fail like a full symbol.
        pub qr_capacity: Option<usize>,
        pub warnings: Vec<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Qr {
            output: String,
            data: String,
        },
        InfoCard {
            output: String,
            lines: Vec<String>,
            caption: String,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_qr_capacity(capacity: usize) -> Self {
            Self {
                qr_capacity: Some(capacity),
                ..Self::default()
            }
        }

        pub fn with_warning(warning: &str) -> Self {
            Self {
                warnings: vec![warning.to_string()],
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn qr(&self, params: &QrParams) -> Result<(), BackendError> {
            if self.qr_capacity.is_some_and(|cap| params.data.len() > cap) {
                return Err(BackendError::QrCapacity {
                    len: params.data.len(),
                    reason: "data too long".to_string(),
                });
            }
            self.operations.lock().unwrap().push(RecordedOp::Qr {
                output: params.output.to_string_lossy().to_string(),
                data: params.data.clone(),
            });
            Ok(())
        }

        fn info_card(&self, params: &InfoParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::InfoCard {
                output: params.output.to_string_lossy().to_string(),
                lines: params.lines.clone(),
                caption: params.caption.clone(),
            });
            Ok(())
        }

        fn warnings(&self) -> Vec<String> {
            self.warnings.clone()
        }
    }

    #[test]
    fn mock_records_qr() {
        let backend = MockBackend::new();
        backend
            .qr(&QrParams::new(
                "/out/qr.png".into(),
                "https://example.com/".into(),
                &Default::default(),
            ))
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Qr { output, data } if output == "/out/qr.png" && data == "https://example.com/"
        ));
    }

    #[test]
    fn mock_qr_capacity_error() {
        let backend = MockBackend::with_qr_capacity(4);
        let result = backend.qr(&QrParams::new(
            "/out/qr.png".into(),
            "https://example.com/".into(),
            &Default::default(),
        ));
        assert!(matches!(result, Err(BackendError::QrCapacity { len: 20, .. })));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn default_backend_has_no_warnings() {
        struct Silent;
        impl ImageBackend for Silent {
            fn qr(&self, _: &QrParams) -> Result<(), BackendError> {
                Ok(())
            }
            fn info_card(&self, _: &InfoParams) -> Result<(), BackendError> {
                Ok(())
            }
        }
        assert!(Silent.warnings().is_empty());
    }
}
