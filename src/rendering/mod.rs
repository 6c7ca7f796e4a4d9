//! Rendering pipeline: scene layout, paint commands, rasterization and SVG
//! serialization.

pub mod layout;
pub mod paint;
pub mod raster;
pub mod svg;

use sha2::{Digest, Sha256};

/// A rendered PNG frame.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    /// SHA-256 hex digest of the PNG bytes, used by golden tests and cache
    /// comparisons.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.png_data);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_content_addressed() {
        let a = Screenshot {
            width: 2,
            height: 2,
            png_data: vec![1, 2, 3],
        };
        let b = Screenshot {
            width: 2,
            height: 2,
            png_data: vec![1, 2, 3],
        };
        let c = Screenshot {
            width: 2,
            height: 2,
            png_data: vec![4, 5, 6],
        };
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
