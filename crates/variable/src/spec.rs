use std::fmt;
use std::io::{self, Write};

/// Renders a value for the `print` operation.
pub(crate) type RenderFn<T> = dyn Fn(&T) -> String + Send;

/// Destination the worker writes printed values into.
///
/// Defaults to the process standard output. Each print writes the rendered
/// value followed by a newline and flushes.
pub struct PrintSink {
	inner: Box<dyn Write + Send>,
}

impl PrintSink {
	/// Sink writing to standard output.
	pub fn stdout() -> Self {
		Self::writer(io::stdout())
	}

	/// Sink writing into an arbitrary writer.
	pub fn writer(writer: impl Write + Send + 'static) -> Self {
		Self { inner: Box::new(writer) }
	}

	pub(crate) fn print_line(&mut self, line: &str) -> io::Result<()> {
		writeln!(self.inner, "{line}")?;
		self.inner.flush()
	}
}

impl Default for PrintSink {
	fn default() -> Self {
		Self::stdout()
	}
}

impl fmt::Debug for PrintSink {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PrintSink").finish_non_exhaustive()
	}
}

/// Builder spec for one variable.
pub struct VariableSpec<T> {
	pub(crate) name: String,
	pub(crate) initial: T,
	pub(crate) render: Box<RenderFn<T>>,
	pub(crate) sink: PrintSink,
	pub(crate) thread_name: Option<String>,
}

impl<T> VariableSpec<T>
where
	T: fmt::Display + 'static,
{
	/// Creates a spec that prints values through their [`fmt::Display`] impl.
	pub fn new(name: impl Into<String>, initial: T) -> Self {
		Self::with_renderer(name, initial, T::to_string)
	}
}

impl<T> VariableSpec<T>
where
	T: 'static,
{
	/// Creates a spec with an explicit renderer, for values without a
	/// [`fmt::Display`] impl (e.g. `Option<String>`).
	pub fn with_renderer(name: impl Into<String>, initial: T, render: impl Fn(&T) -> String + Send + 'static) -> Self {
		Self {
			name: name.into(),
			initial,
			render: Box::new(render),
			sink: PrintSink::default(),
			thread_name: None,
		}
	}

	/// Redirects `print` output.
	#[must_use]
	pub fn sink(mut self, sink: PrintSink) -> Self {
		self.sink = sink;
		self
	}

	/// Overrides the worker thread name (default `solo-var-<id>`).
	#[must_use]
	pub fn thread_name(mut self, name: impl Into<String>) -> Self {
		self.thread_name = Some(name.into());
		self
	}

	/// Variable name used in errors and tracing fields.
	pub fn name(&self) -> &str {
		&self.name
	}
}

impl<T> fmt::Debug for VariableSpec<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("VariableSpec")
			.field("name", &self.name)
			.field("thread_name", &self.thread_name)
			.finish_non_exhaustive()
	}
}
