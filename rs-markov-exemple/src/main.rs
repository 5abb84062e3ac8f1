use std::env;
use std::fs;

use log::info;
use rs_markov_core::config::ChainConfig;
use rs_markov_core::model::markov_chain::{MarkovChain, StartSeed};
use rs_markov_core::model::vocabulary::Vocabulary;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows training and dead-end details
    env_logger::init();

    // Optional JSON configuration, ex. { "seed": 42, "length": 5, "restart_bias": 0.1 }
    let config: ChainConfig = match env::var("MARKOV_CONFIG") {
        Ok(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        Err(_) => ChainConfig::default(),
    };
    info!("using {config:?}");

    // Seeded from the configuration if any, otherwise from OS entropy
    let mut chain = MarkovChain::from_config(&config)?;

    // Learn every adjacent pair of the sample sequence
    let sequence = ["walk", "run", "jump", "walk", "run", "walk", "jump"];
    chain.train(&sequence);

    // Dump the raw transition counts
    chain.print_model();

    // Generate from a fixed start, then from a random known state
    let generated = chain.generate("walk", config.length);
    println!("{}", generated.join(" "));

    let generated = chain.generate_from(&StartSeed::Random, config.length)?;
    println!("{}", generated.join(" "));

    // An unknown start is a dead end: only the start is returned
    println!("{}", chain.generate("swim", config.length).join(" "));

    // Walk a small state machine built transition by transition
    let mut states = Vocabulary::new();
    for name in ["Running", "Idle", "Jumping", "Attacking", "Patroling"] {
        states.add(name);
    }

    let mut machine = MarkovChain::from_config(&config)?;
    for other in 1..states.len() {
        machine.add_both_directions(0, other);
    }
    machine.add_transition(0, 1);

    let walker = machine.walker(0, config.restart_bias)?;
    for (i, state) in walker.take(20).enumerate() {
        println!("{} {} {}", i, state, states.get(state).copied().unwrap_or("?"));
    }

    Ok(())
}
