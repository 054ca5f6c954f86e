use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_explorer::data::model::City;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::Parser;

/// Write synthetic chicago.csv, new_york_city.csv and washington.csv
#[derive(Debug, Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Output directory
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Trips per city
    #[arg(long, default_value_t = 2_000)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
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

    /// Skewed pick: low indices are more popular.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let u = self.next_f64();
        let i = ((u * u) * items.len() as f64) as usize;
        &items[i.min(items.len() - 1)]
    }
}

struct CitySpec {
    city: City,
    stations: &'static [&'static str],
    demographics: bool,
    fractional_durations: bool,
}

const CITIES: [CitySpec; 3] = [
    CitySpec {
        city: City::Chicago,
        stations: &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Theater on the Lake",
            "Clinton St & Washington Blvd",
            "Michigan Ave & Oak St",
            "Canal St & Adams St",
        ],
        demographics: true,
        fractional_durations: false,
    },
    CitySpec {
        city: City::NewYorkCity,
        stations: &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "West St & Chambers St",
            "Broadway & E 22 St",
            "Central Park S & 6 Ave",
        ],
        demographics: true,
        fractional_durations: false,
    },
    CitySpec {
        city: City::Washington,
        stations: &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
            "Smithsonian-National Mall / Jefferson Dr & 12th St SW",
        ],
        demographics: false,
        fractional_durations: true,
    },
];

/// Rush hours dominate; weekends spread through the day.
fn start_time(rng: &mut SimpleRng) -> NaiveDateTime {
    let base = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    // first half of 2017
    let day = (rng.next_f64() * 181.0) as i64;
    let hour = match rng.next_f64() {
        u if u < 0.35 => rng.gauss(8.0, 1.0),
        u if u < 0.70 => rng.gauss(17.0, 1.2),
        _ => 6.0 + rng.next_f64() * 17.0,
    }
    .clamp(0.0, 23.0) as i64;
    let seconds = (rng.next_f64() * 3600.0) as i64;
    base + Duration::days(day) + Duration::hours(hour) + Duration::seconds(seconds)
}

fn write_city(dir: &Path, city: &CitySpec, rows: usize, rng: &mut SimpleRng) -> Result<()> {
    let path = dir.join(city.city.file_name());
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec![
        "",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if city.demographics {
        header.extend(["Gender", "Birth Year"]);
    }
    writer.write_record(&header)?;

    for id in 0..rows {
        let start = start_time(rng);
        let duration = rng.gauss(6.5, 0.7).exp().clamp(60.0, 86_400.0);
        let duration = if city.fractional_durations {
            (duration * 1000.0).round() / 1000.0
        } else {
            duration.round()
        };
        let end = start + Duration::milliseconds((duration * 1000.0) as i64);

        let from = rng.pick(city.stations);
        let to = rng.pick(city.stations);
        let user_type = if rng.next_f64() < 0.8 { "Subscriber" } else { "Customer" };

        let mut record = vec![
            id.to_string(),
            start.format("%Y-%m-%d %H:%M:%S").to_string(),
            end.format("%Y-%m-%d %H:%M:%S").to_string(),
            duration.to_string(),
            (*from).to_owned(),
            (*to).to_owned(),
            user_type.to_owned(),
        ];
        if city.demographics {
            // customers rarely report demographics
            if user_type == "Subscriber" {
                let gender = if rng.next_f64() < 0.75 { "Male" } else { "Female" };
                let year = rng.gauss(1981.0, 11.0).clamp(1930.0, 2001.0).round();
                record.push(gender.to_owned());
                record.push(format!("{year:.1}"));
            } else {
                record.push(String::new());
                record.push(String::new());
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    println!("Wrote {rows} trips to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut rng = SimpleRng::new(args.seed);
    for city in &CITIES {
        write_city(&args.out_dir, city, args.rows, &mut rng)?;
        log::debug!("Finished {}", city.city);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_explorer::data::loader::load_file;
    use bikeshare_explorer::data::model::DatasetSchema;

    #[test]
    fn generated_files_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = SimpleRng::new(7);
        for spec in &CITIES {
            write_city(dir.path(), spec, 50, &mut rng).unwrap();

            let (schema, trips) = load_file(&dir.path().join(spec.city.file_name())).unwrap();
            assert_eq!(trips.len(), 50);
            assert_eq!(schema.has_demographics(), spec.demographics);
            assert_eq!(schema == DatasetSchema::Basic, spec.fractional_durations);
            assert!(trips.iter().all(|t| t.record.end_time >= t.record.start_time));
            assert!(trips
                .iter()
                .all(|t| spec.stations.contains(&t.record.start_station.as_str())));
        }
    }
}
