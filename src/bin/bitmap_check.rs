#[macro_use]
mod common;

use std::process;

use boolwidth::arch::{self, host_endianness, Word, CHAR_BIT, TARGET};
use boolwidth::{Bitmap, BitmapError};
use common::{fatal, ColorChoice};
use log::{debug, info};
use pico_args::Arguments;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use target_lexicon::Endianness;
use thiserror::Error;

const HELP: &str = concat!(
    env!("CARGO_BIN_NAME"),
    " ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Fills a bitmap with random bits and checks them against its raw memory.\n",
    "\n",
    "usage: ",
    env!("CARGO_BIN_NAME"),
    " [FLAGS] [OPTIONS] [<size>]

FLAGS:
    -h, --help              Prints help information
    -V, --version           Prints version information
        --print-type-sizes  Print the size in bytes of `bool` and of the bitmap types first

OPTIONS:
        --word-size <bits>  The width of each backing word: 8, 16, 32 or 64. [default: 32]
        --seed <seed>       Seed for the random fill. [default: random]
        --color <when>      Color diagnostics: always, auto or never. [default: auto]

ARGS:
    <size>    The number of bits in the bitmap. [default: 235]"
);

const USAGE: &str = "usage: bitmap-check [--help] [--version | -V] [--print-type-sizes] [--word-size <bits>] [--seed <seed>] [--color <when>] [<size>]";

const DEFAULT_SIZE: usize = 235;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordSize {
    W8,
    W16,
    W32,
    W64,
}

impl std::str::FromStr for WordSize {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<WordSize, &'static str> {
        match s {
            "8" => Ok(WordSize::W8),
            "16" => Ok(WordSize::W16),
            "32" => Ok(WordSize::W32),
            "64" => Ok(WordSize::W64),
            _ => Err("word size must be one of 8, 16, 32 or 64"),
        }
    }
}

struct CheckOpt {
    size: usize,
    word_size: WordSize,
    seed: Option<u64>,
    color: ColorChoice,
    print_type_sizes: bool,
}

#[derive(Debug, Error)]
enum CheckError {
    #[error("{0}")]
    Bitmap(#[from] BitmapError),
    #[error("bit {index} did not read back the value just written to it")]
    ReadBack { index: usize },
    #[error("raw memory disagrees with the bitmap at bits {positions:?}")]
    Layout { positions: Vec<usize> },
    #[error("padding bits past bit {len} are set")]
    Padding { len: usize },
}

impl CheckError {
    fn exit_code(&self) -> i32 {
        match self {
            CheckError::Bitmap(_) => 3,
            _ => 2,
        }
    }
}

fn parse_args() -> Result<CheckOpt, pico_args::Error> {
    let mut input = Arguments::from_env();
    if input.contains(["-h", "--help"]) {
        println!("{}", HELP);
        process::exit(0);
    }
    if input.contains(["-V", "--version"]) {
        println!("{} {}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }
    // free arguments have to be taken last
    let opt = CheckOpt {
        print_type_sizes: input.contains("--print-type-sizes"),
        word_size: input
            .opt_value_from_str("--word-size")?
            .unwrap_or(WordSize::W32),
        seed: input.opt_value_from_str("--seed")?,
        color: input
            .opt_value_from_str("--color")?
            .unwrap_or(ColorChoice::Auto),
        size: input.opt_free_from_str()?.unwrap_or(DEFAULT_SIZE),
    };
    let rest = input.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {:?}", rest),
        });
    }
    Ok(opt)
}

/// Expand bytes into bits, least significant bit of each byte first.
///
/// Reading bits this way puts bit 0 at position 0,
/// instead of position 7 as it would be written with the MSB on the left.
fn lsb_first(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..CHAR_BIT).map(move |bit| (byte >> bit) & 1 == 1))
        .collect()
}

/// The bits of `bitmap` as they sit in memory, in logical order.
///
/// Each word's bytes are laid out least significant byte first on a little-endian host.
/// On a big-endian host the bytes of every word have to be reversed first.
fn raw_bits<W: Word>(bitmap: &Bitmap<W>) -> Vec<bool> {
    let mut bytes = bitmap.to_ne_bytes();
    if host_endianness() == Endianness::Big {
        let word_bytes = (W::BITS / CHAR_BIT) as usize;
        for word in bytes.chunks_mut(word_bytes) {
            word.reverse();
        }
    }
    lsb_first(&bytes)
}

fn check<W: Word>(size: usize, seed: u64) -> Result<(), CheckError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bitmap = Bitmap::<W>::zeroed(size);
    for index in 0..bitmap.len() {
        let value: bool = rng.gen();
        bitmap.set(index, value)?;
        if bitmap.get(index)? != value {
            return Err(CheckError::ReadBack { index });
        }
    }
    debug!("filled {:?}", bitmap);

    let expected = bitmap.get_range(..);
    let raw = raw_bits(&bitmap);
    let positions: Vec<usize> = expected
        .iter()
        .zip(&raw)
        .enumerate()
        .filter(|(_, (bit, raw))| bit != raw)
        .map(|(index, _)| index)
        .collect();
    if !positions.is_empty() {
        return Err(CheckError::Layout { positions });
    }
    if raw[size..].iter().any(|&bit| bit) {
        return Err(CheckError::Padding { len: size });
    }
    Ok(())
}

fn main() {
    let opt = match parse_args() {
        Ok(opt) => opt,
        Err(err) => {
            println!(
                "{}: error parsing args: {}",
                std::env::args()
                    .next()
                    .unwrap_or_else(|| env!("CARGO_BIN_NAME").into()),
                err
            );
            println!("{}", USAGE);
            process::exit(1);
        }
    };

    #[cfg(feature = "color-backtrace")]
    common::backtrace::install(opt.color);

    env_logger::Builder::from_default_env()
        .write_style(opt.color.write_style())
        .init();

    if opt.print_type_sizes {
        type_sizes!(
            bool,
            Option<bool>,
            Bitmap<u8>,
            Bitmap<u32>,
            Bitmap<u64>,
            BitmapError
        );
    }

    let seed = opt.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        "host is {} ({:?}), bool is {} byte(s), seed is {}",
        TARGET,
        host_endianness(),
        arch::BOOL_SIZE,
        seed
    );
    let result = match opt.word_size {
        WordSize::W8 => check::<u8>(opt.size, seed),
        WordSize::W16 => check::<u16>(opt.size, seed),
        WordSize::W32 => check::<u32>(opt.size, seed),
        WordSize::W64 => check::<u64>(opt.size, seed),
    };
    match result {
        Ok(()) => println!("tests passed"),
        Err(err) => fatal(&err, err.exit_code(), opt.color),
    }
}
