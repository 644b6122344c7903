//! Filesystem watcher standing in for an editor's save notifications.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::event::{AccessKind, AccessMode, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::WatchSettings;
use crate::document::Document;
use crate::error::{GuardianError, Result};
use crate::workspace::Workspace;

use super::saves::SaveEventBus;

/// How long `run` waits on the event channel before polling again.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Quiet period that ends a batch.
const SETTLE_WINDOW: Duration = Duration::from_millis(120);

/// Longest a busy tree can hold a batch open.
const MAX_BATCH_WAIT: Duration = Duration::from_secs(1);

/// Recursive watcher over every workspace folder.
pub struct FsWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    folders: Vec<PathBuf>,
    ignore: Vec<String>,
}

impl FsWatcher {
    /// Start watching the workspace.
    ///
    /// # Errors
    ///
    /// `WatchFailed` if the workspace is empty or a folder cannot be
    /// watched.
    pub fn start(workspace: &Workspace, settings: &WatchSettings) -> Result<Self> {
        if workspace.is_empty() {
            return Err(GuardianError::WatchFailed {
                message: "no workspace folder to watch".to_string(),
            });
        }

        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<Event>| {
                let _ = tx.send(result);
            },
            notify::Config::default(),
        )?;

        for folder in workspace.folders() {
            watcher.watch(folder, RecursiveMode::Recursive)?;
            tracing::info!("Watching {}", folder.display());
        }

        Ok(Self {
            _watcher: watcher,
            events: rx,
            folders: workspace.folders().to_vec(),
            ignore: settings.ignore.clone(),
        })
    }

    /// Wait up to `timeout` for an event, then keep collecting until the
    /// tree has been quiet for a short settle window.
    ///
    /// Returns the saved files in first-seen order, each at most once. An
    /// empty batch means nothing relevant happened.
    ///
    /// # Errors
    ///
    /// `WatchFailed` if the watcher has shut down.
    pub fn next_batch(&self, timeout: Duration) -> Result<Vec<PathBuf>> {
        let first = match self.events.recv_timeout(timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => return Ok(Vec::new()),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(GuardianError::WatchFailed {
                    message: "watcher channel closed".to_string(),
                })
            }
        };

        let mut events = Vec::new();
        push_event(first, &mut events);

        let deadline = Instant::now() + MAX_BATCH_WAIT;
        while Instant::now() < deadline {
            match self.events.recv_timeout(SETTLE_WINDOW) {
                Ok(result) => push_event(result, &mut events),
                // A closed channel surfaces on the next call.
                Err(_) => break,
            }
        }

        Ok(saved_paths(&events, &self.folders, &self.ignore)
            .into_iter()
            .filter(|path| path.is_file())
            .collect())
    }

    /// Emit a save for every changed file until the watcher fails.
    pub fn run(&self, saves: &SaveEventBus) -> Result<()> {
        loop {
            for path in self.next_batch(POLL_INTERVAL)? {
                saves.emit(&Document::open(&path, None));
            }
        }
    }
}

fn push_event(result: notify::Result<Event>, events: &mut Vec<Event>) {
    match result {
        Ok(event) => events.push(event),
        Err(e) => tracing::warn!("watch error: {}", e),
    }
}

/// Whether an event kind marks a finished save.
///
/// inotify reports the close of a written file, so intermediate writes
/// and the truncating open never count. A rename onto the path covers
/// editors that save through a temporary file.
#[cfg(target_os = "linux")]
pub fn is_save_kind(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Access(AccessKind::Close(AccessMode::Write))
            | EventKind::Modify(ModifyKind::Name(
                RenameMode::To | RenameMode::Both | RenameMode::Any
            ))
    )
}

/// Whether an event kind marks a finished save.
///
/// Without close events any write counts, and the settle window in
/// [`FsWatcher::next_batch`] folds a save's writes into one batch.
#[cfg(not(target_os = "linux"))]
pub fn is_save_kind(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Access(AccessKind::Close(AccessMode::Write))
            | EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Any)
            | EventKind::Modify(ModifyKind::Name(
                RenameMode::To | RenameMode::Both | RenameMode::Any
            ))
    )
}

/// Whether `path` lies under an ignored directory.
///
/// Only components below the owning workspace folder count, so a project
/// that itself sits inside a `vendor` directory is still watched.
pub fn is_ignored(path: &Path, folders: &[PathBuf], ignore: &[String]) -> bool {
    let relative = folders
        .iter()
        .filter_map(|folder| path.strip_prefix(folder).ok())
        .min_by_key(|rel| rel.components().count())
        .unwrap_or(path);

    relative
        .components()
        .any(|c| ignore.iter().any(|name| c.as_os_str() == name.as_str()))
}

/// Coalesce a batch of events into the distinct paths that were saved.
pub fn saved_paths(events: &[Event], folders: &[PathBuf], ignore: &[String]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for event in events.iter().filter(|e| is_save_kind(&e.kind)) {
        for path in &event.paths {
            if is_ignored(path, folders, ignore) || paths.contains(path) {
                continue;
            }
            paths.push(path.clone());
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};

    fn ignore() -> Vec<String> {
        WatchSettings::default().ignore
    }

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn save_kinds() {
        assert!(is_save_kind(&EventKind::Access(AccessKind::Close(
            AccessMode::Write
        ))));
        assert!(is_save_kind(&EventKind::Modify(ModifyKind::Name(
            RenameMode::To
        ))));

        assert!(!is_save_kind(&EventKind::Access(AccessKind::Close(
            AccessMode::Read
        ))));

        assert!(!is_save_kind(&EventKind::Modify(ModifyKind::Name(
            RenameMode::From
        ))));
        assert!(!is_save_kind(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::Permissions
        ))));
        assert!(!is_save_kind(&EventKind::Remove(RemoveKind::File)));
        assert!(!is_save_kind(&EventKind::Access(AccessKind::Any)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn writes_before_close_are_not_saves() {
        assert!(!is_save_kind(&EventKind::Create(CreateKind::File)));
        assert!(!is_save_kind(&EventKind::Modify(ModifyKind::Data(
            DataChange::Any
        ))));
        assert!(!is_save_kind(&EventKind::Access(AccessKind::Open(
            AccessMode::Any
        ))));
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn writes_count_without_close_events() {
        assert!(is_save_kind(&EventKind::Create(CreateKind::File)));
        assert!(is_save_kind(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
    }

    #[test]
    fn ignored_directories_are_relative_to_folder() {
        let folders = vec![PathBuf::from("/srv/vendor/site")];

        assert!(!is_ignored(
            Path::new("/srv/vendor/site/src/a.php"),
            &folders,
            &ignore()
        ));
        assert!(is_ignored(
            Path::new("/srv/vendor/site/vendor/bin/phpcbf"),
            &folders,
            &ignore()
        ));
        assert!(is_ignored(
            Path::new("/srv/vendor/site/node_modules/x/index.js"),
            &folders,
            &ignore()
        ));
        assert!(is_ignored(
            Path::new("/srv/vendor/site/.git/index"),
            &folders,
            &ignore()
        ));
    }

    #[test]
    fn batch_is_coalesced_per_path() {
        let closed = || EventKind::Access(AccessKind::Close(AccessMode::Write));
        let folders = vec![PathBuf::from("/proj")];
        let events = vec![
            event(EventKind::Create(CreateKind::File), "/proj/a.php"),
            event(closed(), "/proj/a.php"),
            event(closed(), "/proj/a.php"),
            event(closed(), "/proj/vendor/autoload.php"),
            event(
                EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)),
                "/proj/b.js",
            ),
            event(
                EventKind::Modify(ModifyKind::Name(RenameMode::To)),
                "/proj/src/App.tsx",
            ),
        ];

        assert_eq!(
            saved_paths(&events, &folders, &ignore()),
            vec![
                PathBuf::from("/proj/a.php"),
                PathBuf::from("/proj/src/App.tsx")
            ]
        );
    }

    #[test]
    fn empty_workspace_cannot_be_watched() {
        let result = FsWatcher::start(&Workspace::empty(), &WatchSettings::default());
        assert!(matches!(result, Err(GuardianError::WatchFailed { .. })));
    }

    #[test]
    fn idle_watcher_returns_empty_batch() {
        let temp = tempfile::TempDir::new().unwrap();
        let workspace = Workspace::new([temp.path().to_path_buf()]);
        let watcher = FsWatcher::start(&workspace, &WatchSettings::default()).unwrap();

        assert!(watcher
            .next_batch(Duration::from_millis(50))
            .unwrap()
            .is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn written_file_is_reported() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("vendor")).unwrap();
        let workspace = Workspace::new([temp.path().to_path_buf()]);
        let watcher = FsWatcher::start(&workspace, &WatchSettings::default()).unwrap();

        let ignored = temp.path().join("vendor").join("autoload.php");
        let saved = temp.path().join("Foo.php");
        std::fs::write(&ignored, "<?php").unwrap();
        std::fs::write(&saved, "<?php echo 1;").unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut seen = Vec::new();
        while !seen.contains(&saved) && Instant::now() < deadline {
            seen.extend(watcher.next_batch(Duration::from_millis(200)).unwrap());
        }

        assert!(seen.contains(&saved));
        assert!(!seen.contains(&ignored));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn half_written_file_is_reported_once_after_close() {
        use std::io::Write;

        let temp = tempfile::TempDir::new().unwrap();
        let workspace = Workspace::new([temp.path().to_path_buf()]);
        let watcher = FsWatcher::start(&workspace, &WatchSettings::default()).unwrap();
        let path = temp.path().join("Foo.php");

        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"<?php\n// first half\n").unwrap();
        file.flush().unwrap();
        assert!(watcher
            .next_batch(Duration::from_millis(500))
            .unwrap()
            .is_empty());

        file.write_all(b"echo 1;\n").unwrap();
        drop(file);

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut batch = Vec::new();
        while batch.is_empty() && Instant::now() < deadline {
            batch = watcher.next_batch(Duration::from_millis(200)).unwrap();
        }
        assert_eq!(batch, vec![path.clone()]);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<?php\n// first half\necho 1;\n"
        );

        assert!(watcher
            .next_batch(Duration::from_millis(500))
            .unwrap()
            .is_empty());
    }
}
