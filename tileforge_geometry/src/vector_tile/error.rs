use anyhow::Result;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Returned when encoding stops because its cancellation token fired.
///
/// Travels inside [`anyhow::Error`] without added context, so callers can test for it with
/// `err.is::<Cancelled>()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("operation cancelled")
	}
}

impl std::error::Error for Cancelled {}

impl Cancelled {
	/// Fails with [`Cancelled`] once `cancel` has fired.
	pub fn check(cancel: &CancellationToken) -> Result<()> {
		if cancel.is_cancelled() {
			return Err(Cancelled.into());
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::Context;

	#[test]
	fn identity_survives_anyhow() {
		let err = anyhow::Error::new(Cancelled);
		assert!(err.is::<Cancelled>());
		assert_eq!(err.to_string(), "operation cancelled");
	}

	#[test]
	fn check() {
		let cancel = CancellationToken::new();
		assert!(Cancelled::check(&cancel).is_ok());
		cancel.cancel();
		assert!(Cancelled::check(&cancel).unwrap_err().is::<Cancelled>());
	}

	#[test]
	fn context_hides_identity() {
		let err = Err::<(), _>(Cancelled).context("while encoding").unwrap_err();
		assert!(!err.is::<Cancelled>());
		assert!(err.downcast_ref::<Cancelled>().is_some());
	}
}
