//! End-to-end walk through a variable's whole life, as seen from outside the
//! crate.

use std::io::Write;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use solo_variable::{PrintSink, Variable, VariableError, VariableSpec, WorkerExit};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
	fn text(&self) -> String {
		String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
	}
}

impl Write for Capture {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}

#[test]
fn hello_bye_lifecycle() {
	let capture = Capture::default();
	let var = Variable::spawn(VariableSpec::new("greeting", String::from("Hello")).sink(PrintSink::writer(capture.clone()))).unwrap();

	var.print().unwrap();
	assert_eq!(var.get().unwrap(), "Hello");

	var.set(String::from("bye")).unwrap();
	var.print().unwrap();
	assert_eq!(var.get().unwrap(), "bye");

	var.delete().unwrap();
	assert!(matches!(var.get(), Err(VariableError::Terminated { ref name }) if name == "greeting"));
	assert_eq!(var.wait(), WorkerExit::Terminated);

	assert_eq!(capture.text(), "Hello\nbye\n");
}

#[test]
fn empty_variable_reads_back_none() {
	let var = Variable::spawn(VariableSpec::with_renderer("empty", None::<String>, |v: &Option<String>| format!("{v:?}"))).unwrap();
	assert_eq!(var.get().unwrap(), None);
	assert_eq!(var.delete_and_wait().unwrap(), WorkerExit::Terminated);
}

#[test]
fn variables_are_independent() {
	let a = Variable::new(1i32).unwrap();
	let b = Variable::new(2i32).unwrap();
	assert_ne!(a.id(), b.id());

	a.set(10).unwrap();
	a.delete().unwrap();

	assert_eq!(b.get().unwrap(), 2);
	b.update(|v| *v *= 21).unwrap();
	assert_eq!(b.get().unwrap(), 42);
	assert_eq!(b.delete_and_wait().unwrap(), WorkerExit::Terminated);
	assert_eq!(a.wait(), WorkerExit::Terminated);
}
