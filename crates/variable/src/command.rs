use std::fmt;

use tokio::sync::oneshot;

/// Read-modify-write closure applied by the worker.
pub(crate) type UpdateFn<T> = Box<dyn FnOnce(&mut T) + Send>;

/// One operation requested of a variable's worker.
pub(crate) enum Command<T> {
	/// Replace the current value.
	Write(T),
	/// Post a copy of the current value into the reply channel.
	Read(oneshot::Sender<T>),
	/// Render the current value into the print sink.
	Print,
	/// Mutate the current value in place.
	Update(UpdateFn<T>),
	/// Stop the worker; nothing queued after this is applied.
	Terminate,
}

impl<T> Command<T> {
	pub(crate) const fn as_str(&self) -> &'static str {
		match self {
			Self::Write(_) => "write",
			Self::Read(_) => "read",
			Self::Print => "print",
			Self::Update(_) => "update",
			Self::Terminate => "terminate",
		}
	}
}

impl<T> fmt::Debug for Command<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
