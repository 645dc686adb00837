use crate::errors::Result;
use crate::simulation::engine::Engine;
use crate::simulation::{Simulation, Status};
use slog::Logger;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

const COMMAND_BUFFER: usize = 16;
// updates beyond this many unread ones are dropped
const UPDATE_BUFFER: usize = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command<P> {
    Start,
    Pause,
    Toggle,
    Reset,
    SetPolicy(P),
    Shutdown,
}

/// State published after every command and every tick.
pub struct Update<E: Engine> {
    pub status: Status,
    pub policy: E::Policy,
    pub snapshot: E::Snapshot,
    // `None` for updates caused by a command rather than a tick
    pub step: Option<E::Step>,
}

// Driver is the external clock: a task that owns a simulation and ticks it on a fixed
// interval while it is running. Commands and ticks are handled by the same task, one at
// a time, so a tick never overlaps a reset.
pub struct Driver<E: Engine> {
    commands: mpsc::Sender<Command<E::Policy>>,
    handle: JoinHandle<Simulation<E>>,
}

impl<E> Driver<E>
where
    E: Engine + Send + 'static,
    E::Policy: Send,
    E::Snapshot: Send,
    E::Step: Send,
{
    /// Spawns a driver ticking at the engine's reference cadence.
    pub fn spawn(
        simulation: Simulation<E>,
        logger: &Logger,
    ) -> (Self, mpsc::Receiver<Update<E>>) {
        Self::with_period(simulation, E::TICK_INTERVAL, logger)
    }

    pub fn with_period(
        simulation: Simulation<E>,
        period: Duration,
        logger: &Logger,
    ) -> (Self, mpsc::Receiver<Update<E>>) {
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (update_tx, updates) = mpsc::channel(UPDATE_BUFFER);
        let handle = tokio::spawn(run(
            simulation,
            period,
            command_rx,
            update_tx,
            logger.clone(),
        ));

        (Self { commands, handle }, updates)
    }

    pub async fn send(&self, command: Command<E::Policy>) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("driver has stopped"))
    }

    /// Stops the driver and hands the simulation back.
    pub async fn shutdown(self) -> Result<Simulation<E>> {
        // the task may already be gone, the join below reports why
        let _ = self.commands.send(Command::Shutdown).await;
        Ok(self.handle.await?)
    }
}

async fn run<E: Engine>(
    mut simulation: Simulation<E>,
    period: Duration,
    mut commands: mpsc::Receiver<Command<E::Policy>>,
    updates: mpsc::Sender<Update<E>>,
    logger: Logger,
) -> Simulation<E> {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!(logger, "driver started, period: {:?}", period);

    loop {
        let step = tokio::select! {
            command = commands.recv() => {
                let was_running = simulation.status() == Status::Running;
                match command {
                    Some(Command::Start) => simulation.start(),
                    Some(Command::Pause) => simulation.pause(),
                    Some(Command::Toggle) => simulation.toggle(),
                    Some(Command::Reset) => simulation.reset(),
                    Some(Command::SetPolicy(policy)) => simulation.set_policy(policy),
                    Some(Command::Shutdown) | None => break,
                }
                // first tick lands one full period after pressing play
                if !was_running && simulation.status() == Status::Running {
                    ticker.reset();
                }
                None
            }
            _ = ticker.tick(), if simulation.status() == Status::Running => {
                match simulation.advance() {
                    Some(tick) => Some(tick.step),
                    None => continue,
                }
            }
        };

        let update = Update {
            status: simulation.status(),
            policy: simulation.policy(),
            snapshot: simulation.engine().snapshot(),
            step,
        };
        match updates.try_send(update) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(logger, "presentation is lagging, update dropped")
            }
            Err(TrySendError::Closed(_)) => debug!(logger, "update receiver dropped"),
        }
    }

    debug!(logger, "driver stopped with status {:?}", simulation.status());
    simulation
}
