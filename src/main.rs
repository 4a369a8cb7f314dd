//! Bitstream and throughput driver for the Cayley PRNG.
//!
//! With no task flag, times Cayley32 against the Mersenne Twister and prints
//! a short report. With a task flag, writes an endless stream of
//! little-endian 64-bit words to stdout for statistical test harnesses,
//! which read until satisfied and then break the pipe:
//!
//! ```bash
//! cargo run --release -- -s 99999 -g | dieharder -g 200 -a
//! ```

use std::io::{self, Write};
use std::time::Instant;

use clap::Parser;

use cayley::{BigUint, Cayley32, Mt64};

/// Words per stdout flush, 8 MiB buffers.
const BUF_WORDS: usize = 1 << 20;

/// Words generated for the throughput report, 2 Gibit.
const REPORT_WORDS: u64 = 1 << 25;

#[derive(Parser)]
#[command(name = "cayley", version)]
#[command(about = "A pseudorandom number generator over the symmetric group S_32")]
struct Cli {
    /// Seed, a hex number
    #[arg(short, long, value_name = "HEX", default_value = "99999")]
    seed: String,

    /// Emit an endless fixed-generator bitstream to stdout
    #[arg(short, long, group = "task")]
    generate: bool,

    /// Emit an endless random-generator bitstream to stdout
    #[arg(short = 'e', long, group = "task")]
    generate_random: bool,

    /// Emit an endless Mersenne Twister bitstream to stdout (baseline)
    #[arg(short = 'm', long, group = "task")]
    generate_twister: bool,
}

/// Stream words to stdout forever, buffered.
///
/// Returns when the consumer closes the pipe.
fn generate(mut next: impl FnMut() -> u64) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut buf = Vec::with_capacity(BUF_WORDS * size_of::<u64>());

    loop {
        buf.clear();
        for _ in 0..BUF_WORDS {
            buf.extend_from_slice(&next().to_le_bytes());
        }

        match out.write_all(&buf) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

/// Nanoseconds per output bit over `n` words.
fn time(mut next: impl FnMut() -> u64, n: u64) -> f64 {
    let start = Instant::now();
    for _ in 0..n {
        std::hint::black_box(next());
    }
    start.elapsed().as_nanos() as f64 / (n * 64) as f64
}

/// Time Cayley32 against the Mersenne Twister and print the comparison.
fn report(cayley: &mut Cayley32, twister: &mut Mt64) {
    let mbits = REPORT_WORDS * 64 / (1 << 20);
    println!("Timing the generation of {mbits} Megabits by Cayley32 and the Mersenne Twister.");

    let t_cayley = time(|| cayley.next_u64(), REPORT_WORDS);
    println!("Cayley32: {t_cayley:.2} nanoseconds per bit");

    let t_twister = time(|| twister.next_u64(), REPORT_WORDS);
    println!("Mersenne Twister: {t_twister:.2} nanoseconds per bit");

    println!("Cayley32 is {:.1} times slower", t_cayley / t_twister);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cayley::init_tracing();

    let seed = BigUint::from_hex(&cli.seed)?;
    let mut twister = Mt64::new(seed.to_u64());

    if cli.generate_twister {
        return Ok(generate(|| twister.next_u64())?);
    }

    if cli.generate_random {
        let mut rng = Cayley32::from_source(&mut twister)?;
        return Ok(generate(move || rng.next_u64())?);
    }

    let mut rng = Cayley32::from_seed(&seed)?;
    if cli.generate {
        return Ok(generate(move || rng.next_u64())?);
    }

    report(&mut rng, &mut twister);
    Ok(())
}
