pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs the workflow's network calls somewhere other than the caller's frame loop.
pub trait TaskSpawner {
    fn spawn(&self, task: Task);
}

/// Runs each task to completion before `spawn` returns. Used for headless runs,
/// where nothing else needs the thread while a request is in flight.
pub struct InlineSpawner;

impl TaskSpawner for InlineSpawner {
    fn spawn(&self, task: Task) {
        task()
    }
}
