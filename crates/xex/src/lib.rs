//! A deliberately minimal stand-in for a real XEX loader.
//!
//! Real Xenon executables are packaged in a container with compression,
//! signing, and section metadata; parsing that container is explicitly out
//! of scope here. [`LoadedImage`] only carries what the interpreter core
//! needs to route memory accesses: the already-extracted image bytes, and
//! the two addresses that locate them in the virtual address space.

use std::path::Path;

use easyerr::{Error, ResultExt};
use tracing::debug;

/// An already-extracted executable image, ready to hand to the interpreter.
///
/// `base_address` and `pe_data_offset` are supplied by the caller (a real
/// loader would read them from the XEX container's optional header); this
/// crate does not derive them from anything.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub base_address: u32,
    pub pe_data_offset: u32,
    pub image: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io { source: std::io::Error },
}

impl LoadedImage {
    pub fn new(base_address: u32, pe_data_offset: u32, image: Vec<u8>) -> Self {
        Self { base_address, pe_data_offset, image }
    }

    /// Reads raw image bytes from disk. No container parsing happens here;
    /// `path` is expected to already point at the flat data this
    /// interpreter's image region should be backed by.
    pub fn from_file(
        path: &Path,
        base_address: u32,
        pe_data_offset: u32,
    ) -> Result<Self, LoadError> {
        let image = std::fs::read(path).context(LoadCtx::Io)?;
        debug!(bytes = image.len(), path = %path.display(), "loaded image");
        Ok(Self::new(base_address, pe_data_offset, image))
    }

    /// The virtual address that `image[0]` corresponds to.
    pub fn xex_base(&self) -> u32 {
        self.base_address.wrapping_sub(self.pe_data_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xex_base_subtracts_pe_data_offset() {
        let image = LoadedImage::new(0x8200_0000, 0x1000, vec![]);
        assert_eq!(image.xex_base(), 0x81FF_F000);
    }
}
