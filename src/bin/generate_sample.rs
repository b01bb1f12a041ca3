use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

const STATUSES: [&str; 3] = ["Approved", "Denied", "Pending"];
const TYPES: [&str; 4] = ["Inpatient", "Outpatient", "Emergency", "Routine"];
const SPECIALTIES: [&str; 12] = [
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Pediatrics",
    "General Practice",
    "Dermatology",
    "Oncology",
    "Radiology",
    "Psychiatry",
    "Gastroenterology",
    "Urology",
    "Ophthalmology",
];
const GENDERS: [&str; 2] = ["M", "F"];

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    /// Pick from `items`, skewed towards the front of the slice.
    fn pick_skewed<'a>(&mut self, items: &[&'a str]) -> &'a str {
        let r = self.next_f64() * self.next_f64();
        items[(r * items.len() as f64) as usize % items.len()]
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SampleRow {
    #[serde(rename = "ClaimID")]
    claim_id: String,
    #[serde(rename = "PatientID")]
    patient_id: String,
    #[serde(rename = "ProviderID")]
    provider_id: String,
    claim_amount: f64,
    claim_date: String,
    patient_age: u64,
    patient_gender: &'static str,
    provider_specialty: &'static str,
    claim_status: &'static str,
    claim_type: &'static str,
}

fn main() -> Result<()> {
    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("enhanced_health_insurance_claims.csv"));
    let n_rows: u64 = match std::env::args().nth(2) {
        Some(raw) => raw.parse().context("row count must be an integer")?,
        None => 5_000,
    };

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).context("invalid start date")?;

    let mut writer = csv::Writer::from_path(&out)
        .with_context(|| format!("creating {}", out.display()))?;

    for i in 0..n_rows {
        let date = start + Duration::days(rng.range(0, 729) as i64);
        // About 1 in 200 rows carries a malformed date.
        let claim_date = if rng.range(0, 199) == 0 {
            "N/A".to_string()
        } else {
            date.format("%Y-%m-%d").to_string()
        };

        let row = SampleRow {
            claim_id: format!("C{:06}", i + 1),
            patient_id: format!("PAT{:05}", rng.range(1, n_rows / 2 + 1)),
            provider_id: format!("PRV{:04}", rng.range(1, 400)),
            claim_amount: ((rng.next_f64() * 9_900.0 + 100.0) * 100.0).round() / 100.0,
            claim_date,
            patient_age: rng.range(18, 90),
            patient_gender: GENDERS[rng.range(0, 1) as usize],
            provider_specialty: rng.pick_skewed(&SPECIALTIES),
            claim_status: rng.pick_skewed(&STATUSES),
            claim_type: rng.pick_skewed(&TYPES),
        };
        writer.serialize(&row).context("writing row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} claims to {}", out.display());
    Ok(())
}
