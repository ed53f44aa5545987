/// Host-side source of the once-per-second tick that drives the game clock.
///
/// `start` arms a recurring timer that should end up calling
/// [`GameSession::tick`](crate::GameSession::tick). Dropping the returned
/// handle must cancel that timer, the way interval handles behave in browser
/// and UI toolkits. A session holds at most one handle and drops it whenever
/// it leaves the playing state.
pub trait TickScheduler {
    type Handle;

    fn start(&mut self) -> Self::Handle;
}

/// Scheduler for hosts that call `tick` themselves; holds no resources.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualTicks;

impl TickScheduler for ManualTicks {
    type Handle = ();

    fn start(&mut self) -> Self::Handle {}
}

impl<S: TickScheduler + ?Sized> TickScheduler for &mut S {
    type Handle = S::Handle;

    fn start(&mut self) -> Self::Handle {
        (**self).start()
    }
}
