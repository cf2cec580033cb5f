use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use qbfgen::formula::Qbf;
use qbfgen::{type1, type2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Family {
    /// Type-1 QBF family.
    Type1,
    /// Type-2 circuit family.
    Type2,
    /// Brute-force CNF rendition of the Type-2 family.
    Type2Slow,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Benchmark family to generate.
    #[arg(value_enum)]
    family: Family,

    /// Size parameter of the instance.
    #[arg(value_name = "INT", default_value = "1")]
    n: u32,

    /// Write the instance into this directory instead of standard output.
    #[clap(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print the human-readable rendition instead of the wire format
    /// (formulas only).
    #[clap(long)]
    pretty: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    match args.family {
        Family::Type1 => emit_formula(type1::generate(args.n), &args)?,
        Family::Type2 => {
            let circuit = type2::generate(args.n);
            match &args.out {
                Some(dir) => {
                    let path = circuit.save_qcir_in(dir)?;
                    println!("Wrote {}", path.display());
                }
                None => {
                    if !circuit.print_qcir()? {
                        println!("Instance too large for the terminal; use --out");
                    }
                }
            }
        }
        Family::Type2Slow => emit_formula(type2::generate_slow(args.n), &args)?,
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}

fn emit_formula(qbf: Qbf, args: &Cli) -> color_eyre::Result<()> {
    match &args.out {
        Some(dir) => {
            let path = if args.pretty {
                qbf.save_printout_in(dir)?
            } else {
                qbf.save_qdimacs_in(dir)?
            };
            println!("Wrote {}", path.display());
        }
        None => {
            let printed = if args.pretty {
                qbf.print()
            } else {
                qbf.print_qdimacs()?
            };
            if !printed {
                println!("Instance too large for the terminal; use --out");
            }
        }
    }
    Ok(())
}
