pub mod excel;

use std::path::{Path, PathBuf};

/// 出力先パスを決定（ディレクトリまたは拡張子なしなら既定ファイル名を付ける）
pub fn output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempdir().unwrap();
        let path = output_path(dir.path(), "updated_comparison.xlsx");
        assert_eq!(path, dir.path().join("updated_comparison.xlsx"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path(Path::new("out/result.xlsx"), "updated_comparison.xlsx");
        assert_eq!(path, PathBuf::from("out/result.xlsx"));
    }

    #[test]
    fn test_output_path_without_extension() {
        let path = output_path(Path::new("out"), "updated_comparison.xlsx");
        assert_eq!(path, PathBuf::from("out/updated_comparison.xlsx"));
    }
}
