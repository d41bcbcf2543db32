//! Periodic driver for the rest timer and the elapsed-time display.
//!
//! The ticker is a future that consumes a stream of ticks and calls a closure for each tick. It
//! stops when the stream ends, when the closure returns [`ControlFlow::Break`] or when its
//! [`TickerGuard`] is dropped, so a view that owns the guard cancels its ticker on every exit
//! path.

use std::{future::Future, ops::ControlFlow, pin::pin};

use futures_util::{
    Stream, StreamExt,
    future::{AbortHandle, Abortable, Aborted},
};
use gloo_timers::future::IntervalStream;
use log::debug;

/// Cancels the associated ticker when dropped.
#[derive(Debug)]
pub struct TickerGuard(AbortHandle);

impl TickerGuard {
    pub fn cancel(&self) {
        self.0.abort();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Returns a future calling `on_tick` for every item of `ticks`.
///
/// The future resolves to `Err(Aborted)` if the ticker was cancelled.
pub fn drive<S, F>(
    ticks: S,
    mut on_tick: F,
) -> (impl Future<Output = Result<(), Aborted>>, TickerGuard)
where
    S: Stream,
    F: FnMut() -> ControlFlow<()>,
{
    let ticker = async move {
        let mut ticks = pin!(ticks);
        while ticks.next().await.is_some() {
            if on_tick().is_break() {
                debug!("ticker stopped");
                break;
            }
        }
    };
    let (handle, registration) = AbortHandle::new_pair();
    (Abortable::new(ticker, registration), TickerGuard(handle))
}

/// Ticks once per second using the browser's interval timer.
#[must_use]
pub fn every_second() -> IntervalStream {
    IntervalStream::new(1000)
}
