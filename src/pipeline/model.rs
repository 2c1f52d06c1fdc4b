//! # Model Loading Glue
//!
//! The post-processing pipeline is driven by a pretrained symbolic-regression
//! checkpoint that is produced and fetched outside this crate. This module
//! only wraps the already-downloaded checkpoint file in an opaque handle. A
//! load failure is reported and answered with "no model available" rather than
//! propagated: the caller decides whether to continue without regression.

use log::{error, info};
use std::fs;
use std::path::Path;
use strum_macros::Display;

/// Device the checkpoint is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Device {
    Cpu,
    Cuda,
}

/// Opaque pretrained model handle: the raw checkpoint bytes and the device
/// they are destined for. Inference itself happens outside this crate.
pub struct Model {
    checkpoint: Vec<u8>,
    device: Device,
}

impl Model {
    pub fn checkpoint(&self) -> &[u8] {
        &self.checkpoint
    }

    pub fn device(&self) -> Device {
        self.device
    }
}

/// Loads a checkpoint file. On any failure the cause is logged and `None` is
/// returned; a missing model is not fatal to the caller.
pub fn load_model(path: &Path, device: Device) -> Option<Model> {
    match fs::read(path) {
        Ok(checkpoint) => {
            info!(
                "loaded model checkpoint from {} ({} bytes, device {})",
                path.display(),
                checkpoint.len(),
                device
            );
            Some(Model { checkpoint, device })
        }
        Err(e) => {
            error!("ERROR: Model not loaded! Error details: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_model_from_file() {
        let mut checkpoint = NamedTempFile::new().unwrap();
        checkpoint.write_all(b"fake checkpoint bytes").unwrap();
        let model = load_model(checkpoint.path(), Device::Cpu).unwrap();
        assert_eq!(model.checkpoint(), b"fake checkpoint bytes");
        assert_eq!(model.device(), Device::Cpu);
    }

    #[test]
    fn test_missing_checkpoint_is_none() {
        assert!(load_model(Path::new("/no/such/checkpoint.pt"), Device::Cuda).is_none());
    }
}
