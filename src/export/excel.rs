//! Excel出力（CLI版）

use crate::error::Result;
use std::path::Path;

/// xlsx バイト列をファイルに保存（親ディレクトリは必要に応じて作成）
pub fn write_bytes(bytes: &[u8], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(output_path, bytes)?;
    Ok(())
}
