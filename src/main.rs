//! Packet Hell headless runner
//!
//! Plays the standard board with the autopilot and logs the
//! outcome. Set `RUST_LOG=debug` to follow individual packets.
//!
//! ```text
//! packet-hell [--seed N] [--tuning FILE] [--difficulty easy|normal|hard] [--ticks N] [--save DIR]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::error::Error;
    use std::path::PathBuf;

    use packet_hell::consts::SIM_DT;
    use packet_hell::persistence::SaveStore;
    use packet_hell::sim::AutoPilot;
    use packet_hell::{Difficulty, Session, Tuning};

    struct Args {
        seed: u64,
        tuning: Option<PathBuf>,
        difficulty: Option<Difficulty>,
        max_ticks: u64,
        save_dir: Option<PathBuf>,
    }

    fn parse_args() -> Result<Args, Box<dyn Error>> {
        let mut args = Args {
            seed: 1,
            tuning: None,
            difficulty: None,
            max_ticks: 20_000,
            save_dir: None,
        };
        let mut it = std::env::args().skip(1);
        while let Some(flag) = it.next() {
            let mut value = || it.next().ok_or_else(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--seed" => args.seed = value()?.parse()?,
                "--tuning" => args.tuning = Some(PathBuf::from(value()?)),
                "--difficulty" => {
                    let name = value()?;
                    args.difficulty =
                        Some(Difficulty::from_str(&name).ok_or_else(|| format!("unknown difficulty {name}"))?);
                }
                "--ticks" => args.max_ticks = value()?.parse()?,
                "--save" => args.save_dir = Some(PathBuf::from(value()?)),
                other => return Err(format!("unknown argument {other}").into()),
            }
        }
        Ok(args)
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let args = parse_args()?;

        let mut tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        if let Some(difficulty) = args.difficulty {
            tuning.apply_preset(difficulty);
        }

        let store = args.save_dir.as_ref().map(|dir| SaveStore::new(dir, "packet-hell"));
        let mut session = Session::new(args.seed, tuning);
        if let Some(store) = &store {
            if store.exists() {
                match store.load() {
                    Ok(sim) => session.load_state(sim),
                    Err(e) => log::warn!("Could not continue saved game: {}", e),
                }
            }
        }
        log::info!("Packet Hell (native) starting with seed {}", session.sim().seed);

        let mut pilot = AutoPilot::new();
        while !session.sim().status.is_terminal() && session.sim().time_ticks < args.max_ticks {
            pilot.step(session.sim_mut());
            session.advance(SIM_DT);
        }

        let view = session.snapshot();
        log::info!(
            "Finished: {:?} after {} ticks ({} delivered, {} lost, {} launched, {} coins, {:.0} wire left)",
            view.status,
            view.time_ticks,
            view.counters.delivered,
            view.counters.lost,
            view.counters.total_spawned,
            view.counters.coins,
            view.remaining_budget
        );

        if let Some(store) = &store {
            if view.status.is_terminal() {
                store.clear()?;
            } else {
                store.save(session.sim())?;
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = runner::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
