use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identifier for one variable worker.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(u64);

impl VariableId {
	/// Returns the next identifier, starting at 1.
	pub(crate) fn next() -> Self {
		Self(NEXT_ID.fetch_add(1, Ordering::AcqRel).wrapping_add(1))
	}

	pub const fn raw(self) -> u64 {
		self.0
	}
}

impl fmt::Debug for VariableId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "VariableId({})", self.0)
	}
}

impl fmt::Display for VariableId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_are_strictly_increasing() {
		let a = VariableId::next();
		let b = VariableId::next();
		assert!(b > a);
		assert_ne!(a.raw(), 0);
	}
}
