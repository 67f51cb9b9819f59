//! Several components sharing one board through cloned handles: a sensor
//! publishes readings, an alert service watches one key, and a reporter
//! summarizes whatever has accumulated.

use blackboard::{Blackboard, BoardError};

struct Sensor {
    board: Blackboard,
}

impl Sensor {
    fn new(board: Blackboard) -> Self {
        Self { board }
    }

    fn publish(&self, celsius: f64) {
        self.board.write("temperature", celsius);
    }

    fn publish_status(&self, status: &str) {
        self.board.write("status", status.to_string());
    }
}

struct Reporter {
    board: Blackboard,
}

impl Reporter {
    fn new(board: Blackboard) -> Self {
        Self { board }
    }

    fn record(&self, celsius: f64) -> Result<(), BoardError> {
        if !self.board.contains_key::<Vec<f64>>("history") {
            self.board.write_silent("history", Vec::<f64>::new());
        }
        self.board.with_mut("history", |history: &mut Vec<f64>| {
            history.push(celsius);
        })
    }

    fn summary(&self) -> Result<String, BoardError> {
        let status: String = self.board.read("status")?;
        self.board.with("history", |history: &Vec<f64>| {
            let max = history.iter().cloned().fold(f64::MIN, f64::max);
            format!("{} readings, max {max:.1}°C, status: {status}", history.len())
        })
    }
}

fn main() -> Result<(), BoardError> {
    let board = Blackboard::new();

    let sensor = Sensor::new(board.clone());
    let reporter = Reporter::new(board.clone());

    // The alert service reacts to writes instead of polling; its callback
    // reads other keys from the same board re-entrantly.
    let alerts = board.clone();
    board.subscribe_pair("temperature", move |key, celsius: &f64| {
        if *celsius > 30.0 {
            println!("ALERT: {key} reached {celsius:.1}°C");
            alerts.write_silent("status", "overheating".to_string());
        }
    });

    sensor.publish_status("nominal");

    for reading in [21.5, 24.0, 31.2, 28.9] {
        sensor.publish(reading);
        reporter.record(reading)?;
    }

    println!("{}", reporter.summary()?);

    Ok(())
}
