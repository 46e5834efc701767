//! Fixed-interval driver for the runner simulation.
//!
//! One timer thread drives one playing session at 20 ms per tick,
//! emitting a snapshot event every tick and a game-over event on the
//! terminal transition. `start` always cancels any previous worker before
//! spawning a new one, so two loops can never drive the same simulation;
//! `stop` is idempotent and dropping the loop cancels the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use questdeck_logic::constants::runner::TICK_MS;
use questdeck_logic::runner::{RunnerSim, RunnerSnapshot, TickEvent};

/// Events the loop delivers to its host.
#[derive(Debug, Clone)]
pub enum RunnerEvent {
    /// One simulation tick elapsed.
    Tick(RunnerSnapshot),
    /// The session ended. Sent exactly once per session, whether the end
    /// came from a collision or an external `stop`.
    GameOver { score: u32, high_score: u32 },
}

struct Worker {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

pub struct RunnerLoop {
    sim: Arc<Mutex<RunnerSim>>,
    events: Sender<RunnerEvent>,
    worker: Option<Worker>,
}

impl RunnerLoop {
    pub fn new(field_width: f32, events: Sender<RunnerEvent>) -> Self {
        Self {
            sim: Arc::new(Mutex::new(RunnerSim::new(field_width))),
            events,
            worker: None,
        }
    }

    /// Seed the best score from a persisted value.
    pub fn restore_high_score(&self, high_score: u32) {
        if let Ok(mut sim) = self.sim.lock() {
            sim.restore_high_score(high_score);
        }
    }

    pub fn snapshot(&self) -> Option<RunnerSnapshot> {
        self.sim.lock().ok().map(|sim| sim.snapshot())
    }

    /// Begin a new session: cancel any outstanding worker, reset the
    /// simulation, and spawn a fresh tick thread.
    pub fn start(&mut self) {
        self.cancel_worker();
        if let Ok(mut sim) = self.sim.lock() {
            sim.start(&mut rand::thread_rng());
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let sim = Arc::clone(&self.sim);
        let events = self.events.clone();
        let handle = thread::spawn(move || {
            let mut rng = rand::thread_rng();
            loop {
                thread::sleep(Duration::from_millis(TICK_MS));
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                let step = {
                    let Ok(mut sim) = sim.lock() else { break };
                    sim.step(&mut rng).map(|event| (event, sim.snapshot()))
                };
                match step {
                    // The session was ended from outside the loop.
                    None => break,
                    Some((TickEvent::GameOver { score, high_score }, _)) => {
                        let _ = events.send(RunnerEvent::GameOver { score, high_score });
                        break;
                    }
                    Some((_, snapshot)) => {
                        if events.send(RunnerEvent::Tick(snapshot)).is_err() {
                            // Receiver gone; nobody is watching this session.
                            break;
                        }
                    }
                }
            }
        });
        self.worker = Some(Worker { cancel, handle });
        debug!("runner session started");
    }

    /// Forward a tap to the simulation. No-op unless playing.
    pub fn tap(&self) {
        if let Ok(mut sim) = self.sim.lock() {
            sim.tap();
        }
    }

    /// End the session. Idempotent: only the first stop after `start`
    /// performs the transition and emits the game-over event.
    pub fn stop(&mut self) {
        self.cancel_worker();
        let Ok(mut sim) = self.sim.lock() else {
            return;
        };
        if let Some((score, high_score)) = sim.stop() {
            let _ = self.events.send(RunnerEvent::GameOver { score, high_score });
        }
    }

    fn cancel_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel.store(true, Ordering::Relaxed);
            let _ = worker.handle.join();
        }
    }
}

impl Drop for RunnerLoop {
    fn drop(&mut self) {
        self.cancel_worker();
    }
}
