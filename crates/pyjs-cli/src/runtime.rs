//! The bundled JavaScript adapter module.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "unholy_js.js";

pub const SOURCE: &str = include_str!("../runtime/unholy_js.js");

/// Write the adapter into `dir`, creating it if needed.
pub fn emit(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(FILE_NAME);
    std::fs::write(&path, SOURCE).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyjs::tables::names::{self, RUNTIME_BINDING};
    use tempfile::TempDir;

    #[test]
    fn test_exports_every_renamed_builtin() {
        let builtins = ["format", "iter", "next", "range", "len", "int"];
        for builtin in builtins {
            let target = names::lookup(builtin).unwrap();
            let export = target
                .strip_prefix(RUNTIME_BINDING)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap();
            assert!(
                SOURCE.contains(&format!("    {export},\n")),
                "{export} is not exported"
            );
        }
        assert!(SOURCE.contains("    py__contains,\n"));
    }

    #[test]
    fn test_emit_creates_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("not_python");
        let path = emit(&target).unwrap();
        assert_eq!(path, target.join(FILE_NAME));
        assert_eq!(std::fs::read_to_string(path).unwrap(), SOURCE);
    }
}
