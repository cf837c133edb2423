use crate::formatter::LogFormat;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Directive, EnvFilter, Layer, Registry};

/// A worker guard returned by the file layer.
///
/// When a guard is dropped, all events currently in-memory are flushed to the log file this guard
/// belongs to.
pub type FileWorkerGuard = WorkerGuard;

/// A boxed tracing [Layer].
pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Default [directives](Directive) for [`EnvFilter`] which disables high-frequency debug logs
/// from dependencies.
const DEFAULT_ENV_FILTER_DIRECTIVES: [&str; 0] = [];

/// Manages the collection of layers for a tracing subscriber.
pub(crate) struct Layers {
    inner: Vec<BoxedLayer<Registry>>,
}

impl Layers {
    pub(crate) const fn new() -> Self {
        Self { inner: vec![] }
    }

    pub(crate) fn into_inner(self) -> Vec<BoxedLayer<Registry>> {
        self.inner
    }

    /// Adds a stdout layer.
    pub(crate) fn stdout(
        &mut self,
        format: LogFormat,
        default_directive: Directive,
        filters: &str,
        color: Option<String>,
    ) -> eyre::Result<()> {
        let filter = build_env_filter(Some(default_directive), filters)?;
        self.inner.push(format.apply(filter, color, None));
        Ok(())
    }

    /// Adds a non-blocking file layer and returns the guard that flushes it.
    pub(crate) fn file(
        &mut self,
        format: LogFormat,
        filters: &str,
        file_info: FileInfo,
    ) -> eyre::Result<FileWorkerGuard> {
        let (writer, guard) = file_info.create_log_writer()?;
        let filter = build_env_filter(None, filters)?;
        self.inner.push(format.apply(filter, None, Some(writer)));
        Ok(guard)
    }
}

/// Holds configuration information for file logging.
#[derive(Debug, Clone)]
pub struct FileInfo {
    dir: PathBuf,
    file_name: String,
}

impl FileInfo {
    /// Creates a new `FileInfo` instance.
    pub const fn new(dir: PathBuf, file_name: String) -> Self {
        Self { dir, file_name }
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    fn create_log_writer(
        &self,
    ) -> eyre::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
        std::fs::create_dir_all(&self.dir)?;
        let appender = tracing_appender::rolling::never(&self.dir, &self.file_name);
        Ok(tracing_appender::non_blocking(appender))
    }
}

/// Builds an environment filter for logging.
///
/// The events are filtered by `default_directive`, unless overridden by `RUST_LOG`.
///
/// # Errors
///
/// Returns an error if any of the directives are invalid.
pub(crate) fn build_env_filter(
    default_directive: Option<Directive>,
    directives: &str,
) -> eyre::Result<EnvFilter> {
    let env_filter = if let Some(default_directive) = default_directive {
        EnvFilter::builder().with_default_directive(default_directive).from_env_lossy()
    } else {
        EnvFilter::builder().with_default_directive(LevelFilter::OFF.into()).from_env_lossy()
    };

    DEFAULT_ENV_FILTER_DIRECTIVES
        .into_iter()
        .chain(directives.split(',').filter(|d| !d.is_empty()))
        .try_fold(env_filter, |env_filter, directive| {
            Ok(env_filter.add_directive(directive.parse()?))
        })
}
