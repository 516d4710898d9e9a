use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::errors::WikiError;
use crate::types::{Page, Title};

/// Persistence for page bodies, keyed by title
pub trait PageStore: Send + Sync {
    /// Load the full body stored for `title`.
    ///
    /// A missing entry is `PageNotFound`; any other failure of the medium is `Io`.
    fn load(&self, title: &Title) -> Result<Page, WikiError>;

    /// Replace the entry for `page.title` with `page.body` in full.
    fn save(&self, page: &Page) -> Result<(), WikiError>;
}

/// Stores each page as `<title>.txt` inside a data directory
#[derive(Clone)]
pub struct FilePageStore {
    data_dir: PathBuf,
}

impl FilePageStore {
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating FilePageStore with data directory: {:?}", data_dir);
        Self { data_dir }
    }

    /// Storage location for a title
    pub fn path_for(&self, title: &Title) -> PathBuf {
        self.data_dir.join(format!("{}.txt", title))
    }
}

impl PageStore for FilePageStore {
    fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        debug!("Loading page '{}' from {:?}", title, path);

        match fs::read(&path) {
            Ok(body) => {
                debug!("Loaded page '{}', {} bytes", title, body.len());
                Ok(Page::new(title.clone(), body))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(WikiError::PageNotFound(title.to_string()))
            }
            Err(e) => {
                error!("Failed to read page {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.path_for(&page.title);
        debug!("Saving page '{}' to {:?}", page.title, path);

        // Write beside the target and rename over it so readers see either
        // the old body or the new one. New temp files are mode 0600 on Unix.
        let write = || -> io::Result<()> {
            let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
            tmp.write_all(&page.body)?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        };

        write().map_err(|e| {
            error!("Failed to save page {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved page '{}', {} bytes", page.title, page.body.len());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    #[test]
    fn storage_key_is_title_dot_txt() {
        let store = FilePageStore::new(PathBuf::from("pages"));
        assert_eq!(store.path_for(&title("Alpha")), PathBuf::from("pages/Alpha.txt"));
    }

    #[test]
    fn save_then_load_returns_the_same_bytes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FilePageStore::new(temp_dir.path().to_path_buf());
        let body: Vec<u8> = vec![0, 159, 146, 150, b'[', b'x', b']', b'\n', 255];

        store.save(&Page::new(title("Alpha"), body.clone())).unwrap();
        let loaded = store.load(&title("Alpha")).unwrap();

        assert_eq!(loaded.title, title("Alpha"));
        assert_eq!(loaded.body, body);
        assert_eq!(fs::read(temp_dir.path().join("Alpha.txt")).unwrap(), body);
    }

    #[test]
    fn save_overwrites_in_full() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FilePageStore::new(temp_dir.path().to_path_buf());

        store.save(&Page::new(title("Alpha"), "a much longer first body")).unwrap();
        store.save(&Page::new(title("Alpha"), "short")).unwrap();

        assert_eq!(store.load(&title("Alpha")).unwrap().body, b"short");
    }

    #[test]
    fn save_leaves_no_temporary_files_behind() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FilePageStore::new(temp_dir.path().to_path_buf());
        store.save(&Page::new(title("Alpha"), "body")).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Alpha.txt".to_string()]);
    }

    #[test]
    fn titles_differing_in_case_are_distinct_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FilePageStore::new(temp_dir.path().to_path_buf());
        assert_ne!(store.path_for(&title("Alpha")), store.path_for(&title("alpha")));
    }

    #[test]
    fn missing_entry_is_page_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FilePageStore::new(temp_dir.path().to_path_buf());

        let err = store.load(&title("Nope")).unwrap_err();
        assert!(err.is_missing_page());
    }

    #[test]
    fn unreadable_entry_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        // A directory where the file should be fails to read for a reason other than absence
        fs::create_dir(temp_dir.path().join("Alpha.txt")).unwrap();
        let store = FilePageStore::new(temp_dir.path().to_path_buf());

        assert!(matches!(store.load(&title("Alpha")), Err(WikiError::Io(_))));
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FilePageStore::new(temp_dir.path().join("gone"));

        let err = store.save(&Page::new(title("Alpha"), "body")).unwrap_err();
        assert!(matches!(err, WikiError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn saved_pages_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let store = FilePageStore::new(temp_dir.path().to_path_buf());
        store.save(&Page::new(title("Alpha"), "body")).unwrap();

        let mode = fs::metadata(temp_dir.path().join("Alpha.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn concurrent_loads_see_whole_bodies() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FilePageStore::new(temp_dir.path().to_path_buf()));
        let old = vec![b'o'; 64 * 1024];
        let new = vec![b'n'; 96 * 1024];
        store.save(&Page::new(title("Alpha"), old.clone())).unwrap();

        let writer = {
            let store = store.clone();
            let (old, new) = (old.clone(), new.clone());
            std::thread::spawn(move || {
                for i in 0..200 {
                    let body = if i % 2 == 0 { new.clone() } else { old.clone() };
                    store.save(&Page::new(title("Alpha"), body)).unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                let (old, new) = (old.clone(), new.clone());
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let body = store.load(&title("Alpha")).unwrap().body;
                        assert!(body == old || body == new, "torn read of {} bytes", body.len());
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }

    mod round_trip {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_body_survives_save_and_load(
                raw_title in "[a-zA-Z0-9]{1,16}",
                body in proptest::collection::vec(any::<u8>(), 0..4096),
            ) {
                let temp_dir = tempfile::tempdir().unwrap();
                let store = FilePageStore::new(temp_dir.path().to_path_buf());
                let page = Page::new(title(&raw_title), body.clone());

                store.save(&page).unwrap();
                let loaded = store.load(&page.title).unwrap();

                prop_assert_eq!(loaded.title, page.title);
                prop_assert_eq!(loaded.body, body);
            }
        }
    }
}
