//! Bodies of the sample programs.
//!
//! Each function takes an open session by value, runs one operation and
//! closes the session before returning, whatever the outcome.

pub mod arp;
pub mod isis;

use log::warn;

use crate::error::Result;
use crate::session::Session;

/// Close `session` once and hand back `outcome`.
///
/// An error from the operation wins over an error from closing.
pub async fn finish<S: Session, T>(mut session: S, outcome: Result<T>) -> Result<T> {
    let closed = session.close().await;
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_error)) => {
            warn!("Close failed after error: {}", close_error);
            Err(e)
        }
    }
}
