use tracing::Level;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter, MakeWriterExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Warnings and errors go to `errors`, everything else to `info`.
pub fn split_by_level<E, O>(errors: E, info: O) -> BoxMakeWriter
where
    E: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    O: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    BoxMakeWriter::new(errors.with_max_level(Level::WARN).or_else(info))
}

fn console_writer() -> BoxMakeWriter {
    split_by_level(std::io::stderr, std::io::stdout)
}

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("huge_json=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("huge_json=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(console_writer())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("huge_json=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(console_writer())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

/// In-memory console used by tests to see which stream a line ends up on.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CapturedWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl CapturedWriter {
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    fn make(&self) -> impl Fn() -> CapturedWriter + Send + Sync + 'static {
        let writer = self.clone();
        move || writer.clone()
    }
}

#[cfg(test)]
impl std::io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Subscriber shaped like the console one, writing into `(stderr, stdout)` buffers.
#[cfg(test)]
pub(crate) fn captured_console(
    json: bool,
) -> (
    impl tracing::Subscriber + Send + Sync + 'static,
    CapturedWriter,
    CapturedWriter,
) {
    use tracing_subscriber::Layer;

    let stderr = CapturedWriter::default();
    let stdout = CapturedWriter::default();
    let writer = split_by_level(stderr.make(), stdout.make());

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);
    let layer = if json {
        layer.json().boxed()
    } else {
        layer.compact().boxed()
    };

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new("info"))
        .with(layer);
    (subscriber, stderr, stdout)
}
