//! Walks the process-wide blackboard through its whole lifecycle: create,
//! write, subscribe, notify, wipe, destroy. Run with
//! `RUST_LOG=trace cargo run --example score_watch` to see the board's
//! tracing output alongside the printed results.

use blackboard::BoardError;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), BoardError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    if !blackboard::create() {
        eprintln!("the blackboard failed to create");
        return Ok(());
    }
    println!("blackboard created");

    blackboard::write("score", 10i32)?;
    println!("wrote score = 10");

    blackboard::subscribe_value("score", |v: &i32| {
        println!("  -> score changed to {v}");
    })?;

    blackboard::write("score", 42i32)?;
    println!("current score: {}", blackboard::read::<i32>("score")?);

    // A silent write updates the value without waking the subscriber
    blackboard::write_silent("score", 99i32)?;
    println!("after silent write: {}", blackboard::read::<i32>("score")?);

    blackboard::wipe_key("score")?;
    match blackboard::read::<i32>("score") {
        Ok(v) => println!("unexpected score {v}"),
        Err(e) => println!("after wipe: {e}"),
    }

    println!("destroying the blackboard");
    blackboard::destroy();
    println!("ready: {}", blackboard::is_ready());

    Ok(())
}
