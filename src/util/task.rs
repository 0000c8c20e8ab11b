use std::collections::HashMap;
use tokio::task::JoinHandle;
use tracing::debug;

pub const AUTHENTICATE: &str = "authenticate";
pub const SEARCH: &str = "search";
pub const ALBUM_LOOKUP: &str = "album_lookup";
pub const REDIRECT: &str = "redirect";

/// Background tasks keyed by purpose. Spawning under a key that is still
/// running aborts the previous task.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, key: &'static str, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key, task) {
            if !handle.is_finished() {
                debug!("Aborting superseded task '{}'", key);
            }
            handle.abort();
        }
    }

    pub fn abort(&mut self, key: &str) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.tasks.get(key).is_some_and(|handle| !handle.is_finished())
    }

    pub fn abort_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_spawn_same_key_aborts_previous() {
        let mut tasks = TaskManager::new();
        let (tx, rx) = oneshot::channel::<()>();

        tasks.spawn(
            SEARCH,
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                let _ = tx.send(());
            }),
        );
        tasks.spawn(SEARCH, tokio::spawn(async {}));

        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_abort_removes_task() {
        let mut tasks = TaskManager::new();
        tasks.spawn(
            REDIRECT,
            tokio::spawn(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }),
        );
        assert!(tasks.is_running(REDIRECT));

        tasks.abort(REDIRECT);

        assert!(!tasks.is_running(REDIRECT));
    }
}
