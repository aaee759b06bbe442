use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use crate::WorkerExit;
use crate::panic::panic_message;

/// Join coordination state machine for a worker thread.
///
/// Every clone of a variable handle may wait on the worker. Only one caller
/// becomes the leader that joins the thread; the others park on the condvar
/// until the leader records the exit.
enum JoinState {
	/// Worker thread is still owned; first waiter takes it.
	Handle(JoinHandle<WorkerExit>),
	/// A waiter is currently joining the thread.
	Joining,
	/// Worker thread has ended.
	Done(WorkerExit),
}

pub(crate) struct WorkerJoinCtrl {
	state: Mutex<JoinState>,
	done: Condvar,
}

impl WorkerJoinCtrl {
	pub(crate) fn new(handle: JoinHandle<WorkerExit>) -> Self {
		Self {
			state: Mutex::new(JoinState::Handle(handle)),
			done: Condvar::new(),
		}
	}

	/// Blocks until the worker thread has ended. Multiple callers are safe.
	pub(crate) fn join_forever(&self) -> WorkerExit {
		let handle = {
			let mut st = self.state.lock();
			loop {
				match &*st {
					JoinState::Done(exit) => return exit.clone(),
					JoinState::Joining => self.done.wait(&mut st),
					JoinState::Handle(_) => {
						let JoinState::Handle(h) = std::mem::replace(&mut *st, JoinState::Joining) else {
							unreachable!()
						};
						break h;
					}
				}
			}
		};

		let exit = match handle.join() {
			Ok(exit) => exit,
			Err(payload) => WorkerExit::Panicked(panic_message(payload.as_ref())),
		};
		*self.state.lock() = JoinState::Done(exit.clone());
		self.done.notify_all();
		exit
	}

	/// Returns the exit without blocking, if the worker has already ended.
	pub(crate) fn try_join(&self) -> Option<WorkerExit> {
		{
			let st = self.state.lock();
			match &*st {
				JoinState::Done(exit) => return Some(exit.clone()),
				JoinState::Joining => return None,
				JoinState::Handle(h) if !h.is_finished() => return None,
				JoinState::Handle(_) => {}
			}
		}
		Some(self.join_forever())
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::mpsc;
	use std::time::Duration;

	use super::*;

	#[test]
	fn concurrent_waiters_observe_the_same_exit() {
		let (release_tx, release_rx) = mpsc::channel::<()>();
		let handle = std::thread::spawn(move || {
			let _ = release_rx.recv();
			WorkerExit::Terminated
		});
		let ctrl = Arc::new(WorkerJoinCtrl::new(handle));

		let waiters: Vec<_> = (0..4)
			.map(|_| {
				let ctrl = Arc::clone(&ctrl);
				std::thread::spawn(move || ctrl.join_forever())
			})
			.collect();

		std::thread::sleep(Duration::from_millis(10));
		assert_eq!(ctrl.try_join(), None);
		release_tx.send(()).unwrap();

		for waiter in waiters {
			assert_eq!(waiter.join().unwrap(), WorkerExit::Terminated);
		}
		assert_eq!(ctrl.try_join(), Some(WorkerExit::Terminated));
	}

	#[test]
	fn panicked_worker_reports_message() {
		let handle = std::thread::spawn(|| -> WorkerExit { panic!("worker exploded") });
		let ctrl = WorkerJoinCtrl::new(handle);
		assert_eq!(ctrl.join_forever(), WorkerExit::Panicked(Some("worker exploded".to_string())));
	}
}
