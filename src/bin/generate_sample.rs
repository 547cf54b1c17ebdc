//! Writes a synthetic `exoplanet_data_extended.csv` so the dashboard can run
//! with `offline = true` and no network access.

use anyhow::{Context, Result};

const HEADER: [&str; 7] = [
    "pl_name", "pl_orbper", "pl_rade", "pl_masse", "st_mass", "st_rad", "st_teff",
];

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

    /// Log-uniform sample in `[lo, hi]`.
    fn log_uniform(&mut self, lo: f64, hi: f64) -> f64 {
        (lo.ln() + self.next_f64() * (hi.ln() - lo.ln())).exp()
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

fn cell(v: f64, rng: &mut SimpleRng, missing_rate: f64) -> String {
    if rng.next_f64() < missing_rate {
        String::new()
    } else {
        format!("{v:.4}")
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "exoplanet_data_extended.csv".to_string());
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADER)?;

    let n_systems = 400;
    let mut rows = 0usize;
    for system in 0..n_systems {
        let star_mass = rng.uniform(0.08, 2.0);
        let star_radius = star_mass.powf(0.8);
        let teff = (5778.0 * star_mass.powf(0.5)).clamp(2300.0, 9000.0);
        let n_planets = 1 + (rng.next_u64() % 4) as usize;

        for letter in ['b', 'c', 'd', 'e'].iter().take(n_planets) {
            let period = rng.log_uniform(0.5, 2000.0);
            let radius = rng.log_uniform(0.4, 20.0);
            let mass = radius.powf(2.06) * rng.uniform(0.7, 1.3);

            writer.write_record([
                format!("SYN-{system:04} {letter}"),
                cell(period, &mut rng, 0.02),
                cell(radius, &mut rng, 0.10),
                cell(mass, &mut rng, 0.35),
                cell(star_mass, &mut rng, 0.05),
                cell(star_radius, &mut rng, 0.05),
                cell(teff, &mut rng, 0.05),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} synthetic planets to {output_path}");
    Ok(())
}
