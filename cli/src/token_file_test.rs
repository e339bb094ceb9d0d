use std::sync::atomic::{AtomicU32, Ordering};

use fleet::{Session, TOKEN_KEY};

use super::*;

/// Unique path under the system temp dir; removed on drop.
struct ScratchFile(PathBuf);

impl ScratchFile {
    fn new() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        Self(std::env::temp_dir().join(format!("fleet-cli-{}-{n}", std::process::id())).join("token.json"))
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Some(dir) = self.0.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}

#[test]
fn missing_file_reads_as_empty() {
    let scratch = ScratchFile::new();
    let storage = FileStorage::new(&scratch.0);
    assert_eq!(storage.load(TOKEN_KEY), None);
}

#[test]
fn token_survives_a_new_handle() {
    let scratch = ScratchFile::new();
    Session::new(FileStorage::new(&scratch.0)).set_token("tok-1");

    let reopened = Session::new(FileStorage::new(&scratch.0));
    assert_eq!(reopened.token(), Some("tok-1".to_owned()));
}

#[test]
fn clearing_last_key_deletes_the_file() {
    let scratch = ScratchFile::new();
    let session = Session::new(FileStorage::new(&scratch.0));
    session.set_token("tok-1");
    assert!(scratch.0.exists());

    session.clear();

    assert!(!scratch.0.exists());
    assert!(!session.is_authenticated());
}

#[test]
fn remove_keeps_unrelated_keys() {
    let scratch = ScratchFile::new();
    let storage = FileStorage::new(&scratch.0);
    storage.store("other", "kept");
    storage.store(TOKEN_KEY, "tok-1");

    storage.remove(TOKEN_KEY);

    assert_eq!(storage.load("other"), Some("kept".to_owned()));
    assert_eq!(storage.load(TOKEN_KEY), None);
}

#[test]
fn corrupt_file_reads_as_empty() {
    let scratch = ScratchFile::new();
    fs::create_dir_all(scratch.0.parent().unwrap()).unwrap();
    fs::write(&scratch.0, "[1, 2, 3]").unwrap();

    assert_eq!(FileStorage::new(&scratch.0).load(TOKEN_KEY), None);
}

#[cfg(unix)]
#[test]
fn token_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let scratch = ScratchFile::new();
    Session::new(FileStorage::new(&scratch.0)).set_token("tok-1");

    let mode = fs::metadata(&scratch.0).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn rewriting_tightens_existing_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let scratch = ScratchFile::new();
    fs::create_dir_all(scratch.0.parent().unwrap()).unwrap();
    fs::write(&scratch.0, "{}").unwrap();
    fs::set_permissions(&scratch.0, fs::Permissions::from_mode(0o644)).unwrap();

    FileStorage::new(&scratch.0).store(TOKEN_KEY, "tok-2");

    let mode = fs::metadata(&scratch.0).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(FileStorage::new(&scratch.0).load(TOKEN_KEY), Some("tok-2".to_owned()));
}
