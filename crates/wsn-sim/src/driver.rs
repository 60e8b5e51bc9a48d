//! Worker thread that owns a [`Simulation`] and ticks it periodically.
//!
//! The thread is the only writer.  Front-ends talk to it through a
//! [`SimHandle`]: commands go in over a channel, and the latest
//! [`Snapshot`] comes out through a shared slot that is replaced after
//! every change.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::{Command, SimError, SimObserver, SimResult, Simulation, Snapshot, TickAction, TickToken};

const THREAD_NAME: &str = "wsn-sim-driver";

enum Request {
    Command(Command),
    /// Reply with the snapshot after every earlier request was applied.
    Sync(Sender<Snapshot>),
    Shutdown,
}

/// Spawns driver threads.
pub struct SimDriver;

impl SimDriver {
    /// Move `sim` and `observer` onto a new worker thread.
    ///
    /// The simulation keeps its current running flag; send
    /// [`Command::ToggleRunning`] to start periodic ticks.
    pub fn spawn<O>(sim: Simulation, observer: O) -> SimResult<SimHandle<O>>
    where
        O: SimObserver + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let shared = Arc::new(RwLock::new(sim.snapshot()));
        let published = Arc::clone(&shared);

        let join = thread::Builder::new()
            .name(THREAD_NAME.to_owned())
            .spawn(move || run(sim, observer, rx, published))?;

        Ok(SimHandle { tx, shared, join: Some(join) })
    }
}

/// Front-end side of a running driver.
///
/// Dropping the handle stops the thread and discards the simulation; call
/// [`shutdown`](Self::shutdown) to get it back.
pub struct SimHandle<O> {
    tx:     Sender<Request>,
    shared: Arc<RwLock<Snapshot>>,
    join:   Option<JoinHandle<(Simulation, O)>>,
}

impl<O> SimHandle<O> {
    /// Queue `command` for the driver.  Returns immediately.
    pub fn send(&self, command: Command) -> SimResult<()> {
        self.tx
            .send(Request::Command(command))
            .map_err(|_| SimError::DriverDisconnected)
    }

    /// The most recently published snapshot.  May lag queued commands; use
    /// [`flush`](Self::flush) to wait for them.
    pub fn snapshot(&self) -> Snapshot {
        self.shared.read().clone()
    }

    /// Block until every command sent so far was applied, then return the
    /// resulting snapshot.
    pub fn flush(&self) -> SimResult<Snapshot> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(Request::Sync(reply_tx))
            .map_err(|_| SimError::DriverDisconnected)?;
        reply_rx.recv().map_err(|_| SimError::DriverDisconnected)
    }

    pub fn initialize(&self, node_count: usize) -> SimResult<()> {
        self.send(Command::Initialize(node_count))
    }

    pub fn tick(&self, action: TickAction) -> SimResult<()> {
        self.send(Command::Tick(action))
    }

    pub fn reset(&self) -> SimResult<()> {
        self.send(Command::Reset)
    }

    pub fn set_node_count(&self, node_count: usize) -> SimResult<()> {
        self.send(Command::SetNodeCount(node_count))
    }

    pub fn toggle_running(&self) -> SimResult<()> {
        self.send(Command::ToggleRunning)
    }

    pub fn refresh_sensors(&self) -> SimResult<()> {
        self.send(Command::RefreshSensors)
    }

    /// Stop the thread and return the simulation and observer.
    pub fn shutdown(mut self) -> SimResult<(Simulation, O)> {
        // The thread may already be gone if it panicked; join reports that.
        let _ = self.tx.send(Request::Shutdown);
        let join = self.join.take().ok_or(SimError::DriverDisconnected)?;
        join.join().map_err(|_| SimError::DriverPanicked)
    }
}

impl<O> Drop for SimHandle<O> {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.tx.send(Request::Shutdown);
            if join.join().is_err() {
                warn!("{THREAD_NAME} panicked");
            }
        }
    }
}

// ── Worker loop ───────────────────────────────────────────────────────────────

fn run<O: SimObserver>(
    mut sim:      Simulation,
    mut observer: O,
    rx:           Receiver<Request>,
    shared:       Arc<RwLock<Snapshot>>,
) -> (Simulation, O) {
    let interval = sim.config().tick_interval();
    info!("{THREAD_NAME} started, interval {interval:?}");

    // Deadline of the armed periodic tick and the token it was armed under.
    let mut armed: Option<(Instant, TickToken)> = rearm(&sim, None, interval);

    loop {
        let request = match armed {
            Some((deadline, token)) => {
                let now = Instant::now();
                if now >= deadline {
                    if sim.scheduled_tick(token, &mut observer).is_some() {
                        publish(&shared, &sim);
                    }
                    armed = sim.tick_token().map(|t| (Instant::now() + interval, t));
                    continue;
                }
                match rx.recv_timeout(deadline - now) {
                    Ok(request) => request,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match rx.recv() {
                Ok(request) => request,
                Err(_) => break,
            },
        };

        match request {
            Request::Command(command) => {
                debug!("driver command {command:?}");
                sim.execute(command, &mut observer);
                publish(&shared, &sim);
                armed = rearm(&sim, armed, interval);
            }
            Request::Sync(reply) => {
                let _ = reply.send(sim.snapshot());
            }
            Request::Shutdown => break,
        }
    }

    observer.on_sim_end(sim.step());
    info!("{THREAD_NAME} stopped at {}", sim.step());
    (sim, observer)
}

/// Keep the current deadline if its token is still valid; otherwise arm a
/// fresh one a full interval from now, or disarm when stopped.
fn rearm(
    sim:      &Simulation,
    armed:    Option<(Instant, TickToken)>,
    interval: Duration,
) -> Option<(Instant, TickToken)> {
    let token = sim.tick_token()?;
    match armed {
        Some((deadline, current)) if current == token => Some((deadline, current)),
        _ => Some((Instant::now() + interval, token)),
    }
}

fn publish(shared: &RwLock<Snapshot>, sim: &Simulation) {
    *shared.write() = sim.snapshot();
}
