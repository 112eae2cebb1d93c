use crate::Result;

/// The operations the container facade needs from a Docker engine.
///
/// Every call blocks until the engine answers. Failures are returned as-is;
/// nothing here retries.
pub trait Daemon {
    /// `docker run` with already-rendered arguments. Returns captured stdout,
    /// which is the container id for detached runs.
    fn run(&self, args: &[String]) -> Result<String>;

    fn start(&self, reference: &str) -> Result<()>;

    fn stop(&self, reference: &str) -> Result<()>;

    fn pause(&self, reference: &str) -> Result<()>;

    fn unpause(&self, reference: &str) -> Result<()>;

    /// Forced removal, so running containers go too.
    fn remove(&self, reference: &str) -> Result<()>;

    /// Raw inspection payload, or `None` when no such container exists.
    fn inspect(&self, reference: &str) -> Result<Option<serde_json::Value>>;

    fn exists(&self, reference: &str) -> Result<bool> {
        Ok(self.inspect(reference)?.is_some())
    }
}

impl<D: Daemon + ?Sized> Daemon for &D {
    fn run(&self, args: &[String]) -> Result<String> {
        (**self).run(args)
    }

    fn start(&self, reference: &str) -> Result<()> {
        (**self).start(reference)
    }

    fn stop(&self, reference: &str) -> Result<()> {
        (**self).stop(reference)
    }

    fn pause(&self, reference: &str) -> Result<()> {
        (**self).pause(reference)
    }

    fn unpause(&self, reference: &str) -> Result<()> {
        (**self).unpause(reference)
    }

    fn remove(&self, reference: &str) -> Result<()> {
        (**self).remove(reference)
    }

    fn inspect(&self, reference: &str) -> Result<Option<serde_json::Value>> {
        (**self).inspect(reference)
    }
}
