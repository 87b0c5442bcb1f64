use std::f64::consts::TAU;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic daily weather CSV for 2020–2022
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file
    #[arg(default_value = "atl_weather_20to22.csv")]
    output: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Precip")]
    precip: f64,
    #[serde(rename = "Dewpoint")]
    dewpoint: f64,
    #[serde(rename = "Pressure")]
    pressure: f64,
    #[serde(rename = "Visibility")]
    visibility: f64,
    #[serde(rename = "Windspeed")]
    windspeed: f64,
    #[serde(rename = "MaxSpeed")]
    max_speed: f64,
    #[serde(rename = "TempMax")]
    temp_max: f64,
    #[serde(rename = "TempMin")]
    temp_min: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// One synthetic day. `season` is 0 in mid-January, 1 in mid-July.
fn day(date: NaiveDate, rng: &mut SimpleRng) -> Row {
    let phase = f64::from(date.ordinal0()) / 365.25;
    let season = 0.5 - 0.5 * (TAU * (phase - 0.04)).cos();

    let temp_max = rng.gauss(53.0 + 36.0 * season, 5.0);
    let temp_min = temp_max - rng.gauss(18.0, 4.0).clamp(4.0, 35.0);
    let dewpoint = (temp_min - rng.gauss(4.0, 4.0).max(0.0)).max(-5.0);

    let rainy = rng.next_f64() < 0.3;
    let precip = if rainy { rng.gauss(0.0, 0.8).abs() } else { 0.0 };
    let visibility = if rainy {
        rng.gauss(7.0, 2.0).clamp(0.5, 10.0)
    } else {
        rng.gauss(9.5, 0.5).clamp(0.5, 10.0)
    };
    let pressure = rng.gauss(30.05 - if rainy { 0.15 } else { 0.0 }, 0.15);
    let windspeed = rng.gauss(7.0, 2.5).max(0.0);
    let max_speed = windspeed + rng.gauss(8.0, 3.0).max(1.0);

    Row {
        date: date.format("%Y-%m-%d").to_string(),
        precip: round2(precip),
        dewpoint: round1(dewpoint),
        pressure: round2(pressure),
        visibility: round1(visibility),
        windspeed: round1(windspeed),
        max_speed: round1(max_speed),
        temp_max: round1(temp_max),
        temp_min: round1(temp_min),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).context("bad start date")?;
    let end = NaiveDate::from_ymd_opt(2022, 12, 31).context("bad end date")?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut count = 0usize;
    for date in start.iter_days().take_while(|d| *d <= end) {
        writer.serialize(day(date, &mut rng))?;
        count += 1;
    }
    writer.flush()?;

    println!("Wrote {count} days to {}", args.output.display());
    Ok(())
}
