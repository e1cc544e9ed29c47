use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Collects every file under `dir`, recursively, in sorted order so that
/// batch runs are deterministic and `{count}` means the same thing twice.
pub fn files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    collect(dir, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect(&path, out)?;
        } else {
            out.push(path);
        }
    }

    Ok(())
}
