use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::command::Command;
use crate::control::ControlLoop;
use crate::join_ctrl::WorkerJoinCtrl;
use crate::spawn::spawn_worker_thread;
use crate::{VariableError, VariableId, VariableSpec, WorkerExit};

/// Default name for variables created through [`Variable::new`].
const DEFAULT_NAME: &str = "variable";

struct VariableShared {
	id: VariableId,
	name: String,
	/// Cancelled by the first `delete`; shared by every clone.
	deleted: CancellationToken,
	join_ctrl: WorkerJoinCtrl,
}

/// Handle to a mutable cell owned by a dedicated worker thread.
///
/// Cloning the handle is cheap; all clones talk to the same worker. The
/// worker exits when the variable is deleted or when every clone is dropped.
///
/// Operations from one thread are applied in the order that thread issued
/// them. Operations from different threads are applied in channel delivery
/// order.
pub struct Variable<T> {
	tx: UnboundedSender<Command<T>>,
	shared: Arc<VariableShared>,
}

impl<T> Clone for Variable<T> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx.clone(),
			shared: Arc::clone(&self.shared),
		}
	}
}

impl<T> fmt::Debug for Variable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Variable")
			.field("id", &self.shared.id)
			.field("name", &self.shared.name)
			.field("deleted", &self.is_deleted())
			.finish_non_exhaustive()
	}
}

impl<T> Variable<T>
where
	T: fmt::Display + Clone + Send + 'static,
{
	/// Creates a variable holding `initial`, printed via [`fmt::Display`] to
	/// standard output.
	pub fn new(initial: T) -> Result<Self, VariableError> {
		Self::spawn(VariableSpec::new(DEFAULT_NAME, initial))
	}
}

impl<T> Variable<T>
where
	T: Clone + Send + 'static,
{
	/// Starts the worker described by `spec`.
	///
	/// The initial value is owned by the worker from the moment it starts, so
	/// the first read always observes it.
	pub fn spawn(spec: VariableSpec<T>) -> Result<Self, VariableError> {
		let id = VariableId::next();
		let (tx, rx) = mpsc::unbounded_channel();
		let thread_name = spec.thread_name.unwrap_or_else(|| format!("solo-var-{id}"));
		let control = ControlLoop::new(id, spec.name.clone(), spec.initial, rx, spec.render, spec.sink);

		let handle = spawn_worker_thread(id, thread_name, move || control.run()).map_err(|source| VariableError::Spawn {
			name: spec.name.clone(),
			source,
		})?;

		tracing::debug!(variable = %spec.name, variable_id = id.raw(), "variable.spawned");

		Ok(Self {
			tx,
			shared: Arc::new(VariableShared {
				id,
				name: spec.name,
				deleted: CancellationToken::new(),
				join_ctrl: WorkerJoinCtrl::new(handle),
			}),
		})
	}

	/// Replaces the value. Returns once the write is queued; every command this
	/// thread issues afterwards observes the new value.
	pub fn set(&self, value: T) -> Result<(), VariableError> {
		self.send(Command::Write(value))
	}

	/// Returns the value held by the worker when it dequeues this read.
	///
	/// Blocks the calling thread until the worker replies.
	///
	/// # Panics
	///
	/// Panics when called from within an asynchronous execution context; use
	/// [`Self::get_async`] there.
	pub fn get(&self) -> Result<T, VariableError> {
		let reply = self.request_read()?;
		reply.blocking_recv().map_err(|_| self.terminated())
	}

	/// Async variant of [`Self::get`].
	pub async fn get_async(&self) -> Result<T, VariableError> {
		let reply = self.request_read()?;
		reply.await.map_err(|_| self.terminated())
	}

	/// Asks the worker to write the current value, newline-terminated, to its
	/// print sink.
	pub fn print(&self) -> Result<(), VariableError> {
		self.send(Command::Print)
	}

	/// Applies `f` to the value inside the worker, atomically with respect to
	/// every other operation.
	pub fn update(&self, f: impl FnOnce(&mut T) + Send + 'static) -> Result<(), VariableError> {
		self.send(Command::Update(Box::new(f)))
	}

	/// Ends the variable's life.
	///
	/// Every operation issued after this returns fails with
	/// [`VariableError::Terminated`], including from other clones. Commands
	/// already queued ahead of the terminate command are still applied.
	pub fn delete(&self) -> Result<(), VariableError> {
		if self.shared.deleted.is_cancelled() {
			return Err(self.terminated());
		}
		self.shared.deleted.cancel();
		tracing::debug!(variable = %self.shared.name, variable_id = self.shared.id.raw(), "variable.delete");
		self.tx.send(Command::Terminate).map_err(|_| self.terminated())
	}

	/// Deletes the variable and blocks until its worker has exited.
	pub fn delete_and_wait(&self) -> Result<WorkerExit, VariableError> {
		self.delete()?;
		Ok(self.wait())
	}
}

impl<T> Variable<T> {
	/// Process-unique identifier of this variable.
	pub fn id(&self) -> VariableId {
		self.shared.id
	}

	/// Variable name.
	pub fn name(&self) -> &str {
		&self.shared.name
	}

	/// Returns `true` once the variable was deleted or its worker is gone.
	pub fn is_deleted(&self) -> bool {
		self.shared.deleted.is_cancelled() || self.tx.is_closed()
	}

	/// Blocks until the worker thread has exited.
	///
	/// This handle keeps the channel open, so the worker only exits once the
	/// variable is deleted or a command panics.
	pub fn wait(&self) -> WorkerExit {
		self.shared.join_ctrl.join_forever()
	}

	/// Returns the worker exit if it has already happened.
	pub fn try_exit(&self) -> Option<WorkerExit> {
		self.shared.join_ctrl.try_join()
	}

	fn send(&self, cmd: Command<T>) -> Result<(), VariableError> {
		if self.shared.deleted.is_cancelled() {
			tracing::trace!(variable = %self.shared.name, op = cmd.as_str(), "variable.command.rejected");
			return Err(self.terminated());
		}
		self.tx.send(cmd).map_err(|_| self.terminated())
	}

	fn request_read(&self) -> Result<oneshot::Receiver<T>, VariableError> {
		let (reply_tx, reply_rx) = oneshot::channel();
		self.send(Command::Read(reply_tx))?;
		Ok(reply_rx)
	}

	fn terminated(&self) -> VariableError {
		VariableError::Terminated {
			name: self.shared.name.clone(),
		}
	}
}
