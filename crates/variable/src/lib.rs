//! Worker-owned mutable cell.
//!
//! A [`Variable`] keeps its value on a dedicated OS thread. Callers never touch
//! the value directly: every operation is a command sent over an unbounded
//! channel and applied by the worker one at a time.
//! Reads carry a single-use reply channel back to the caller.
//!
//! ```no_run
//! use solo_variable::Variable;
//!
//! let var = Variable::new(String::from("Hello"))?;
//! var.print()?;
//! assert_eq!(var.get()?, "Hello");
//! var.set(String::from("bye"))?;
//! assert_eq!(var.get()?, "bye");
//! var.delete()?;
//! assert!(var.get().is_err());
//! # Ok::<(), solo_variable::VariableError>(())
//! ```

mod command;
mod control;
mod error;
mod id;
mod join_ctrl;
mod panic;
mod spawn;
mod spec;
mod variable;

pub use control::WorkerExit;
pub use error::VariableError;
pub use id::VariableId;
pub use spec::{PrintSink, VariableSpec};
pub use variable::Variable;
