use std::thread::JoinHandle;

use crate::VariableId;

/// Spawns the dedicated named OS thread for one variable worker.
pub(crate) fn spawn_worker_thread<F, R>(id: VariableId, name: String, f: F) -> std::io::Result<JoinHandle<R>>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	tracing::trace!(variable_id = id.raw(), thread = %name, "variable.spawn_thread");
	std::thread::Builder::new().name(name).spawn(f)
}
