use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalize {
    #[default]
    Preserve,
    Lowercase,
}

impl Normalize {
    fn apply(self, raw: &str) -> String {
        match self {
            Normalize::Preserve => raw.to_string(),
            Normalize::Lowercase => raw.to_lowercase(),
        }
    }
}

#[derive(Default)]
struct State {
    raw: String,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

struct Shared {
    state: Mutex<State>,
    active: watch::Sender<String>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, generation: u64, normalize: Normalize) {
        let mut state = self.lock();
        // superseded between the timer firing and taking the lock
        if state.generation != generation {
            return;
        }
        state.pending = None;
        let value = normalize.apply(&state.raw);
        debug!("Publishing filter {:?}", value);
        self.active.send_replace(value);
    }
}

pub struct Debouncer {
    delay: Duration,
    normalize: Normalize,
    shared: Arc<Shared>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (active, _) = watch::channel(String::new());
        Self {
            delay,
            normalize: Normalize::default(),
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                active,
            }),
        }
    }

    pub fn with_normalize(mut self, normalize: Normalize) -> Self {
        self.normalize = normalize;
        self
    }

    /// Records a raw input change and restarts the quiet window. Must be
    /// called from within a tokio runtime.
    pub fn input(&self, value: impl Into<String>) {
        let mut state = self.shared.lock();
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
        state.generation += 1;
        state.raw = value.into();

        let generation = state.generation;
        let shared = Arc::clone(&self.shared);
        let delay = self.delay;
        let normalize = self.normalize;
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.publish(generation, normalize);
        }));
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.active.subscribe()
    }

    pub fn state(&self) -> DebounceState {
        match self.shared.lock().pending {
            Some(_) => DebounceState::Pending,
            None => DebounceState::Idle,
        }
    }

    /// Last value passed to `input`, published or not.
    pub fn raw(&self) -> String {
        self.shared.lock().raw.clone()
    }

    /// Last published filter.
    pub fn active(&self) -> String {
        self.shared.active.borrow().clone()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.shared.lock().pending.take() {
            handle.abort();
        }
    }
}
