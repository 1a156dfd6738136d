use std::env;
use std::path::Path;

use keytone::{engine, input, InstrumentSpec, SynthConfig, SynthError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), SynthError> {
    let spec = match env::args().nth(1) {
        Some(path) => InstrumentSpec::load(Path::new(&path))?,
        None => InstrumentSpec::golden(8),
    };

    let profile = spec.profile()?;
    let config = SynthConfig {
        attack: spec.attack,
        release: spec.release,
        ..SynthConfig::default()
    };

    let (handle, mut controls) = engine::spawn_synth(config, profile)?;

    println!("{} ready to play (Esc to quit)", spec.name);
    input::run_keyboard(&mut controls)?;

    handle.shutdown();
    Ok(())
}
