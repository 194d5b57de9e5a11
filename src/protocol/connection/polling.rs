//! Async helpers for cooperative executors.
//!
//! Connections never block; these helpers turn the `Fifo` retry loop into a
//! future that yields to the executor between attempts. The poll interval
//! comes from a [`PollTimer`], and the overall wait is bounded by any future
//! the caller supplies as a deadline (an embassy `Timer`, a tokio `sleep`,
//! a cancellation signal, ...).
use core::future::Future;

use futures_util::future::{select, Either};
use futures_util::pin_mut;

use crate::error::{Error, Result};
use crate::infra::frame::Frame;
use crate::protocol::connection::Connection;

/// Timer abstraction used between two polling attempts.
pub trait PollTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl Future<Output = ()> + 'a;
}

/// Read a frame, retrying every `poll_ms` while the connection reports
/// `Fifo`.
///
/// Resolves with the first non-`Fifo` outcome, or with `Fifo` once
/// `deadline` completes.
pub async fn read_async<C, T, D>(
    conn: &mut C,
    frame: &mut Frame<'_>,
    timer: &mut T,
    poll_ms: u32,
    deadline: D,
) -> Result
where
    C: Connection + ?Sized,
    T: PollTimer,
    D: Future,
{
    let attempt = async {
        loop {
            match conn.read(frame) {
                Err(Error::Fifo) => timer.delay_ms(poll_ms).await,
                outcome => return outcome,
            }
        }
    };
    race_deadline(attempt, deadline).await
}

/// Write a frame, retrying every `poll_ms` while the connection reports
/// `Fifo`.
///
/// Resolves with the first non-`Fifo` outcome, or with `Fifo` once
/// `deadline` completes.
pub async fn write_async<C, T, D>(
    conn: &mut C,
    frame: &Frame<'_>,
    timer: &mut T,
    poll_ms: u32,
    deadline: D,
) -> Result
where
    C: Connection + ?Sized,
    T: PollTimer,
    D: Future,
{
    let attempt = async {
        loop {
            match conn.write(frame) {
                Err(Error::Fifo) => timer.delay_ms(poll_ms).await,
                outcome => return outcome,
            }
        }
    };
    race_deadline(attempt, deadline).await
}

async fn race_deadline<A, D>(attempt: A, deadline: D) -> Result
where
    A: Future<Output = Result>,
    D: Future,
{
    pin_mut!(attempt);
    pin_mut!(deadline);
    match select(attempt, deadline).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("poll: deadline reached");
            Err(Error::Fifo)
        }
    }
}
