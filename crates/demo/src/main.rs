//! Demonstration driver for `solo-variable`.
//!
//! Walks one variable through its whole life (print, read, write, delete),
//! then shows an empty variable and the error returned for use after delete.

use clap::Parser;
use solo_variable::{Variable, VariableSpec};
use tracing::info;

/// Demo command line arguments.
#[derive(Parser, Debug)]
#[command(name = "solo-demo")]
#[command(about = "Exercise a worker-owned variable")]
struct Args {
	/// Initial value of the demo variable
	#[arg(long, value_name = "TEXT", default_value = "Hello")]
	value: String,

	/// Value written after the first read
	#[arg(long, value_name = "TEXT", default_value = "bye")]
	next: String,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	info!(value = %args.value, next = %args.next, "starting solo-demo");

	let variable = Variable::spawn(VariableSpec::new("demo", args.value))?;

	variable.print()?;
	println!("The value of the variable: {}", variable.get()?);

	variable.set(args.next)?;
	print!("variable = ");
	// The worker writes to the same stdout; flush so the prefix lands first.
	std::io::Write::flush(&mut std::io::stdout())?;
	variable.print()?;
	println!("The value of the variable: {}", variable.get()?);

	let exit = variable.delete_and_wait()?;
	info!(exit = ?exit, "demo variable finished");

	let empty = Variable::spawn(VariableSpec::with_renderer("empty", None::<String>, |v: &Option<String>| v.as_deref().unwrap_or("null").to_owned()))?;
	println!("Fetching val");
	println!("The value of the variable: {}", empty.get()?.as_deref().unwrap_or("null"));
	empty.delete()?;

	match empty.get() {
		Ok(value) => println!("Unexpected value after delete: {value:?}"),
		Err(err) => println!("After delete: {err}"),
	}

	println!("Done testing");
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("solo_variable=trace,solo_demo=debug")
		} else {
			EnvFilter::new("solo_variable=warn,solo_demo=info")
		}
	});

	// Stdout carries the printed values, so logs go to stderr.
	let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);

	tracing_subscriber::registry().with(filter).with(stderr_layer).init();
}
