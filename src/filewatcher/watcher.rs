use std::path::PathBuf;

use notify::{recommended_watcher, Event, RecursiveMode, Watcher};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Watches `root` and calls `on_change` after every create or modify event.
///
/// Events that only touch paths in `ignore` (typically the output file) are
/// skipped so a rebuild does not trigger itself. Must run inside a tokio runtime.
pub fn spawn_watcher<F>(root: PathBuf, ignore: Vec<PathBuf>, on_change: F) -> Result<(), String>
where
    F: Fn() -> Result<(), String> + Send + 'static,
{
    let rt_handle = Handle::current();
    let (tx, mut rx) = mpsc::channel::<notify::Result<Event>>(100);

    let mut watcher = recommended_watcher(move |res| {
        let tx_clone = tx.clone();
        rt_handle.spawn(async move {
            if tx_clone.send(res).await.is_err() {
                info!("File watcher event channel closed");
            }
        });
    })
    .map_err(|e| format!("Failed to initialize file watcher: {}", e))?;

    watcher
        .watch(&root, RecursiveMode::NonRecursive)
        .map_err(|e| format!("Failed to watch '{}': {}", root.display(), e))?;
    info!(root = %root.display(), "Watching input files for changes...");

    tokio::spawn(async move {
        // dropping the watcher stops the events
        let _watcher = watcher;
        while let Some(res) = rx.recv().await {
            match res {
                Ok(event) if is_relevant(&event, &ignore) => {
                    info!(paths = ?event.paths, "File change detected");
                    if let Err(err) = on_change() {
                        error!(error = %err, "Rebuild error");
                    }
                }
                Ok(_) => {}
                Err(err) => error!(error = ?err, "Watch error"),
            }
        }
    });

    Ok(())
}

fn is_relevant(event: &Event, ignore: &[PathBuf]) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event.paths.iter().any(|p| !ignore.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn output_file_changes_are_ignored() {
        let ignore = vec![PathBuf::from("/w/out.js")];
        let own = event(EventKind::Modify(ModifyKind::Any), "/w/out.js");
        let input = event(EventKind::Modify(ModifyKind::Any), "/w/prog.json");
        assert!(!is_relevant(&own, &ignore));
        assert!(is_relevant(&input, &ignore));
    }

    #[test]
    fn only_create_and_modify_count() {
        let created = event(EventKind::Create(CreateKind::File), "/w/prog.json");
        let accessed = event(EventKind::Access(notify::event::AccessKind::Any), "/w/prog.json");
        assert!(is_relevant(&created, &[]));
        assert!(!is_relevant(&accessed, &[]));
    }
}
