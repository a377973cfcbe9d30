use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Removes one entry chosen by the retention plan.
pub trait EntryRemover {
    fn remove_entry(&self, path: &Path) -> io::Result<()>;
}

/// Deletes an entry and everything below it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeRemover;

impl EntryRemover for TreeRemover {
    fn remove_entry(&self, path: &Path) -> io::Result<()> {
        remove_tree(path)
    }
}

/// Post-order removal over an explicit stack: children go before their parent.
///
/// Symbolic links are unlinked, never followed. The first failure stops the
/// removal of this tree and is returned.
pub fn remove_tree(root: &Path) -> io::Result<()> {
    if !fs::symlink_metadata(root)?.is_dir() {
        return fs::remove_file(root);
    }

    let mut stack: Vec<(PathBuf, bool)> = vec![(root.to_path_buf(), false)];

    while let Some((dir, visited)) = stack.pop() {
        if visited {
            fs::remove_dir(&dir)?;
            continue;
        }

        stack.push((dir.clone(), true));

        for child in fs::read_dir(&dir)? {
            let child = child?;
            if child.file_type()?.is_dir() {
                stack.push((child.path(), false));
            } else {
                fs::remove_file(child.path())?;
            }
        }
    }

    Ok(())
}
