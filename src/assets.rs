use crate::error::AssetError;
use fs_extra::dir::{CopyOptions, copy};
use std::path::Path;

/// Mirrors the contents of `src` into `dest`, returning the number of bytes copied.
///
/// Stops at the first failure, so `dest` may be left with a partial copy.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<u64, AssetError> {
    if !src.is_dir() {
        return Err(AssetError::Missing(src.to_path_buf()));
    }

    let mut options = CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;

    copy(src, dest, &options).map_err(|source| AssetError::Copy {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    })
}
