use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::Result;
use magpie::{ModelHandle, DEFAULT_ORDER};
use rand::rngs::ThreadRng;

const DEFAULT_GENERATE_COUNT: usize = 50;
const DEFAULT_CHAOS_COUNT: usize = 60;
const DEFAULT_DATA_DIR: &str = "datas";

fn parse_flag(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == name {
            if let Some(value) = args.get(i + 1) {
                return Some(value.clone());
            }
        } else if let Some(rest) = arg.strip_prefix(&prefix) {
            return Some(rest.to_string());
        }
        i += 1;
    }
    None
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <retrain|generate|chaos|stats|repl> [count] [options]", program);
    eprintln!("Retrain from data folder: {} retrain [--data=DIR] [--order=N]", program);
    eprintln!("Generate: {} generate {} [--data=DIR] [--order=N]", program, DEFAULT_GENERATE_COUNT);
    eprintln!("Chaos: {} chaos {} [--data=DIR]", program, DEFAULT_CHAOS_COUNT);
    eprintln!("Stats: {} stats [--data=DIR]", program);
    eprintln!("Repl: {} repl (retrain/generate/chaos/stats, /exit to quit)", program);
    eprintln!("Default data folder: {}/", DEFAULT_DATA_DIR);
    process::exit(1);
}

fn retrain(handle: &ModelHandle, data_dir: &str) -> bool {
    println!("[◐] Retraining from {}/ ...", data_dir);
    let report = handle.retrain_from_dir(Path::new(data_dir));
    if report.success {
        println!(
            "[✓] Retrained from {} file(s). Chain size: {} | Starters: {}",
            report.loaded, report.chain_size, report.starter_count
        );
    } else {
        eprintln!(
            "Retrain failed: {}",
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
    report.success
}

fn print_stats(handle: &ModelHandle) {
    let stats = handle.stats();
    println!("Chain size :: {}", stats.chain_size);
    println!("Starters   :: {}", stats.starter_count);
    println!("Order      :: {}", stats.order);
    println!("Trained    :: {}", stats.ready);
}

fn print_generated(result: magpie::Result<String>) {
    match result {
        Ok(text) => println!("{}", text),
        Err(err) => println!("{}", err),
    }
}

fn repl(handle: &ModelHandle, data_dir: &str, rng: &mut ThreadRng) -> Result<()> {
    println!("Repl mode. Commands: retrain, generate [n], chaos [n], stats. /exit to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "/exit" || trimmed == "/quit" {
            break;
        }

        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or("");
        let count = parts.next().and_then(|c| c.parse().ok());

        match command {
            "retrain" => {
                retrain(handle, data_dir);
            }
            "generate" => {
                print_generated(handle.generate(count.unwrap_or(DEFAULT_GENERATE_COUNT), rng));
            }
            "chaos" => {
                print_generated(handle.chaos(count.unwrap_or(DEFAULT_CHAOS_COUNT), rng));
            }
            "stats" => print_stats(handle),
            _ => println!("Unknown command: {}", command),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("magpie=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    let data_dir = parse_flag(&args, "--data").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
    let order: usize = parse_flag(&args, "--order")
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_ORDER);

    let handle = ModelHandle::new(order);
    let mut rng = rand::thread_rng();
    let command = args[1].as_str();

    match command {
        "retrain" | "t" => {
            if !retrain(&handle, &data_dir) {
                process::exit(1);
            }
        }
        "generate" | "g" => {
            let count = args
                .get(2)
                .and_then(|c| c.parse().ok())
                .unwrap_or(DEFAULT_GENERATE_COUNT);
            if !retrain(&handle, &data_dir) {
                process::exit(1);
            }
            print_generated(handle.generate(count, &mut rng));
        }
        "chaos" | "c" => {
            let count = args
                .get(2)
                .and_then(|c| c.parse().ok())
                .unwrap_or(DEFAULT_CHAOS_COUNT);
            if !retrain(&handle, &data_dir) {
                process::exit(1);
            }
            print_generated(handle.chaos(count, &mut rng));
        }
        "stats" | "s" => {
            retrain(&handle, &data_dir);
            print_stats(&handle);
        }
        "repl" | "talk" => {
            retrain(&handle, &data_dir);
            repl(&handle, &data_dir, &mut rng)?;
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            usage(&args[0]);
        }
    }

    Ok(())
}
