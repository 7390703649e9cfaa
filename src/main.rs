//! String Evolution CLI - evolve random phrases toward a target.

use std::ops::ControlFlow;
use std::process;

use string_evolution::ga::{
    EvolutionConfig, EvolutionRunner, GenerationStats, Population, RunOptions,
};

/// Phrases shown in the final population sample.
const SAMPLE_SIZE: usize = 49;

struct Args {
    config: EvolutionConfig,
    max_generations: Option<usize>,
    report_every: usize,
}

fn main() {
    env_logger::init();

    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv[1..]).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage(&argv[0]);
        process::exit(1);
    });

    let mut population = Population::from_config(&args.config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!("Genetic Evolution");
    println!("=================");
    println!("Target string:    {:?}", args.config.target);
    println!("Total population: {}", args.config.population_size);
    println!("Mutation rate:    {}%", args.config.mutation_rate * 100.0);
    println!();

    let mut options = RunOptions::default();
    if let Some(max) = args.max_generations {
        options = options.with_max_generations(max);
    }

    let result = EvolutionRunner::run(&mut population, &options, |population| {
        if population.is_finished() || population.generations() % args.report_every == 0 {
            print_report(population);
        }
        ControlFlow::Continue(())
    })
    .unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if !result.finished && result.generations % args.report_every != 0 {
        print_report(&population);
    }

    if result.finished {
        println!("Matched {:?} in {} generations", result.best, result.generations);
    } else {
        println!(
            "Stopped after {} generations; best match {:?}",
            result.generations, result.best
        );
        process::exit(2);
    }
}

/// Prints the stats line followed by the population sample.
fn print_report(population: &Population) {
    print_stats(&population.stats());
    println!("Population sample:");
    for phrase in population.all_phrases().iter().take(SAMPLE_SIZE) {
        println!("  {}", phrase);
    }
    println!();
}

fn print_stats(stats: &GenerationStats) {
    println!(
        "Best match: {:<40} Number of generations: {:>6}  Average fitness: {}",
        stats.best,
        stats.generation,
        to_precision(stats.average_fitness, 2)
    );
}

/// Formats `value` with `digits` significant digits, like `toPrecision`.
fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.max(1) as i32;
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", (digits - 1) as usize, value);
    }
    let mut exponent = value.abs().log10().floor() as i32;
    // rounding can carry into the next power of ten (0.0996 -> 0.10)
    let scaled = (value.abs() * 10f64.powi(digits - 1 - exponent)).round();
    if scaled >= 10f64.powi(digits) {
        exponent += 1;
    }
    let decimals = (digits - 1 - exponent).max(0) as usize;
    format!("{:.*}", decimals, value)
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut config = EvolutionConfig::default();
    let mut max_generations = None;
    let mut report_every = 10;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => config.seed = Some(parse_value(iter.next(), "--seed")?),
            "--max-generations" => {
                max_generations = Some(parse_value(iter.next(), "--max-generations")?)
            }
            "--every" => report_every = parse_value::<usize>(iter.next(), "--every")?.max(1),
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    if let Some(target) = positional.next() {
        config.target = target;
    }
    if let Some(size) = positional.next() {
        config.population_size = size
            .parse()
            .map_err(|_| format!("invalid population size {:?}", size))?;
    }
    if let Some(percent) = positional.next() {
        let percent: f64 = percent
            .parse()
            .map_err(|_| format!("invalid mutation rate {:?}", percent))?;
        config = config.with_mutation_percent(percent);
    }
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument {:?}", extra));
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(Args {
        config,
        max_generations,
        report_every,
    })
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} requires a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("invalid value {:?} for {}", value, flag))
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [TARGET] [POPULATION] [MUTATION_PERCENT] [--seed N] [--max-generations N] [--every N]",
        program
    );
    eprintln!();
    eprintln!("Evolve random strings toward TARGET with a genetic algorithm.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!(
        "  TARGET            Phrase to evolve toward (default: \"Random sequence to evolve towards\")"
    );
    eprintln!("  POPULATION        Individuals per generation (default: 500)");
    eprintln!("  MUTATION_PERCENT  Per-gene mutation rate, 0-100 (default: 1)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed N             Seed the random generator for a reproducible run");
    eprintln!("  --max-generations N  Give up after N generations");
    eprintln!("  --every N            Print progress every N generations (default: 10)");
    eprintln!();
    eprintln!(
        "Only space, 'A'-'Z', [\\]^_`, and 'a'-'y' can be evolved; other characters never match."
    );
}
