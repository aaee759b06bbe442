//! Worker-side control loop.
//!
//! The worker owns the value outright. It dequeues one command at a time and
//! fully applies it (state updated, reply posted) before dequeuing the next,
//! so every caller observes a single total order of operations.

use tokio::sync::mpsc::UnboundedReceiver;

use crate::VariableId;
use crate::command::Command;
use crate::spec::{PrintSink, RenderFn};

/// Why a variable's worker thread ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerExit {
	/// A terminate command was processed.
	Terminated,
	/// Every handle was dropped without deleting the variable.
	Disconnected,
	/// Applying a command panicked; carries the panic message when available.
	Panicked(Option<String>),
}

impl WorkerExit {
	pub fn is_failure(&self) -> bool {
		matches!(self, Self::Panicked(_))
	}
}

/// Continuation directive from applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
	Continue,
	Stop,
}

pub(crate) struct ControlLoop<T> {
	id: VariableId,
	name: String,
	value: T,
	rx: UnboundedReceiver<Command<T>>,
	render: Box<RenderFn<T>>,
	sink: PrintSink,
}

impl<T> ControlLoop<T>
where
	T: Clone + Send + 'static,
{
	/// The initial value is installed here, before the worker starts, so no
	/// read can observe an uninitialized state.
	pub(crate) fn new(id: VariableId, name: String, initial: T, rx: UnboundedReceiver<Command<T>>, render: Box<RenderFn<T>>, sink: PrintSink) -> Self {
		Self {
			id,
			name,
			value: initial,
			rx,
			render,
			sink,
		}
	}

	/// Runs until terminated or until every sender is gone.
	pub(crate) fn run(mut self) -> WorkerExit {
		tracing::debug!(variable = %self.name, variable_id = self.id.raw(), "variable.worker.start");

		let exit = loop {
			let Some(cmd) = self.rx.blocking_recv() else {
				break WorkerExit::Disconnected;
			};
			tracing::trace!(variable = %self.name, variable_id = self.id.raw(), op = cmd.as_str(), "variable.command");
			if self.apply(cmd) == Flow::Stop {
				break WorkerExit::Terminated;
			}
		};

		if exit == WorkerExit::Terminated {
			self.discard_pending();
		}

		tracing::debug!(variable = %self.name, variable_id = self.id.raw(), exit = ?exit, "variable.worker.exit");
		exit
	}

	fn apply(&mut self, cmd: Command<T>) -> Flow {
		match cmd {
			Command::Write(value) => {
				self.value = value;
			}
			Command::Read(reply) => {
				if reply.send(self.value.clone()).is_err() {
					tracing::trace!(variable = %self.name, "variable.read.abandoned");
				}
			}
			Command::Print => {
				let line = (self.render)(&self.value);
				if let Err(err) = self.sink.print_line(&line) {
					tracing::warn!(variable = %self.name, error = %err, "variable.print.failed");
				}
			}
			Command::Update(f) => f(&mut self.value),
			Command::Terminate => return Flow::Stop,
		}
		Flow::Continue
	}

	/// Closes the channel and drops whatever is still queued behind the
	/// terminate command. Dropped reads release their reply senders, so their
	/// callers fail instead of hanging.
	fn discard_pending(&mut self) {
		self.rx.close();
		let mut discarded = 0usize;
		while let Ok(cmd) = self.rx.try_recv() {
			tracing::trace!(variable = %self.name, op = cmd.as_str(), "variable.command.discarded");
			discarded = discarded.wrapping_add(1);
		}
		if discarded > 0 {
			tracing::debug!(variable = %self.name, discarded, "variable.worker.discarded_pending");
		}
	}
}
