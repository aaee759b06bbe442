//! Error types for variable operations.

use thiserror::Error;

/// Errors returned by [`Variable`](crate::Variable) operations.
#[derive(Debug, Error)]
pub enum VariableError {
	/// The variable was deleted or its worker is no longer running.
	#[error("variable '{name}' has been terminated")]
	Terminated {
		/// Name of the variable the operation targeted.
		name: String,
	},

	/// The worker thread could not be started.
	#[error("failed to spawn worker for variable '{name}': {source}")]
	Spawn {
		/// Name of the variable being constructed.
		name: String,
		/// The underlying I/O error from the thread builder.
		#[source]
		source: std::io::Error,
	},
}

impl VariableError {
	/// Returns `true` for [`VariableError::Terminated`].
	pub fn is_terminated(&self) -> bool {
		matches!(self, Self::Terminated { .. })
	}
}
