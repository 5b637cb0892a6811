use anyhow::{Context, Result};

const REGIONS: &[&str] = &[
    "India",
    "Andhra Pradesh",
    "Bihar",
    "Goa",
    "Kerala",
    "Maharashtra",
    "Rajasthan",
    "Tamil Nadu",
    "Uttar Pradesh",
    "West Bengal",
];
const SURVEYS: &[&str] = &["NFHS-4", "NFHS-5"];
const AREAS: &[&str] = &["Urban", "Rural", "Total"];

/// (column, NFHS-4 baseline, change by NFHS-5, rural offset)
const INDICATORS: &[(&str, f64, f64, f64)] = &[
    ("Female population age 6 years and above who ever attended school (%)", 68.0, 3.5, -12.0),
    ("Households with electricity (%)", 88.0, 7.0, -8.0),
    ("Children age 12-23 months fully vaccinated (%)", 62.0, 14.0, -4.0),
    ("Children under 5 years who are stunted (%)", 38.0, -2.5, 6.0),
    ("Women age 15-49 years who are anaemic (%)", 53.0, 4.0, 2.5),
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[-spread, spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * spread
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_nfhs.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    let mut header = vec!["India/States/UTs", "Survey", "Area"];
    header.extend(INDICATORS.iter().map(|(name, ..)| *name));
    writer.write_record(&header)?;

    let mut rows = 0;
    for (r, region) in REGIONS.iter().enumerate() {
        let region_offset = rng.jitter(10.0);
        for (s, survey) in SURVEYS.iter().enumerate() {
            for area in AREAS {
                let mut record = vec![region.to_string(), survey.to_string(), area.to_string()];
                for &(_, base, change, rural) in INDICATORS {
                    let area_offset = match *area {
                        "Rural" => rural,
                        "Urban" => -rural / 2.0,
                        _ => 0.0,
                    };
                    // Leave one gap so the dashboard's empty state can be seen.
                    if r == 3 && s == 0 && *area == "Urban" && base > 80.0 {
                        record.push(String::new());
                        continue;
                    }
                    let value = base + change * s as f64 + area_offset + region_offset
                        + rng.jitter(1.5);
                    record.push(format!("{:.1}", value.clamp(0.0, 100.0)));
                }
                writer.write_record(&record)?;
                rows += 1;
            }
        }
    }
    writer.flush().context("writing output file")?;

    println!(
        "Wrote {rows} rows ({} indicators) to {output_path}",
        INDICATORS.len()
    );
    Ok(())
}
