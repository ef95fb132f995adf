use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use rewatch::config::CommandSpec;
use rewatch::errors::Result;
use rewatch::proc::ProcessBackend;

/// One lifecycle event observed by the fake backend. The number is the
/// handle identity, so tests can assert that restarts replace the handle
/// and that terminate/join always precede the next spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendEvent {
    Spawned(u64),
    Terminated(u64),
    Joined(u64),
}

/// A fake process backend that:
/// - hands out incrementing ids instead of spawning real processes
/// - records every spawn/terminate/join in order.
pub struct FakeProcessBackend {
    next_id: u64,
    events: Arc<Mutex<Vec<BackendEvent>>>,
}

impl FakeProcessBackend {
    pub fn new(events: Arc<Mutex<Vec<BackendEvent>>>) -> Self {
        Self { next_id: 0, events }
    }

    pub fn events(&self) -> Arc<Mutex<Vec<BackendEvent>>> {
        Arc::clone(&self.events)
    }
}

impl ProcessBackend for FakeProcessBackend {
    type Handle = u64;

    fn spawn<'a>(
        &'a mut self,
        _command: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Handle>> + Send + 'a>> {
        self.next_id += 1;
        let id = self.next_id;
        self.events.lock().unwrap().push(BackendEvent::Spawned(id));
        Box::pin(async move { Ok(id) })
    }

    fn terminate<'a>(
        &'a mut self,
        handle: &'a mut Self::Handle,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        self.events
            .lock()
            .unwrap()
            .push(BackendEvent::Terminated(*handle));
        Box::pin(async move { Ok(()) })
    }

    fn join<'a>(
        &'a mut self,
        handle: Self::Handle,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        self.events
            .lock()
            .unwrap()
            .push(BackendEvent::Joined(handle));
        Box::pin(async move { Ok(()) })
    }
}
