//! Where Fieldbook keeps its own files (config).
//!
//! Notes and persons live on the REST backend. Nothing but local settings is stored here.

use std::path::PathBuf;

/// Returns the directory where Fieldbook stores its config.
/// On Linux: `~/.local/share/fieldbook/`.
/// Creates the directory if it doesn't exist; returns `None` if we can't determine the path.
pub fn app_data_dir() -> Option<PathBuf> {
    let dir = directories::ProjectDirs::from("app", "Fieldbook", "Fieldbook")?
        .data_local_dir()
        .to_path_buf();
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_is_created() {
        let dir = app_data_dir().expect("app data dir");
        assert!(dir.is_dir());
    }
}
