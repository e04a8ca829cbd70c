use std::fs;
use std::path::{Path, PathBuf};

/// A small base encoding: `a s d e u ´` and space
#[allow(dead_code)]
pub const MINI_BASE: &str = "\
0 a A A
1 s S S
2 d D D
14 e E E
32 u U U
33 ´ ¨ ´
49 [SPC] [SPC] [SPC]
";

/// Writes `contents` to `dir/name` and returns the path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Lists every file below `dir`, relative to it, sorted
#[allow(dead_code)]
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, files: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, files);
            } else {
                files.push(path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}
