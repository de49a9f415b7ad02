use chem_notation::{encode_reaction_text, normalize_reaction_arrows, sanitize, strip_atom_mappings};
use chemcanvas_rust::config::{build_resolver, AppConfig};
use chemcanvas_rust::{ReactionResolver, ResolutionError};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process::exit;

const USAGE: &str = "Uso: chem-cli <sanitize|arrows|strip-maps|parse|resolve> <texto...>";

/// Nivel de log desde `CHEMCANVAS_LOG` (por defecto `warn`).
fn init_logging() {
    let level = std::env::var("CHEMCANVAS_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("[chem-cli] serialization error: {e}");
            exit(4);
        }
    }
}

fn resolve(query: &str) -> i32 {
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[chem-cli resolve] {e}");
            return 4;
        }
    };
    let resolver = match build_resolver(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[chem-cli resolve] {e}");
            return 4;
        }
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("[chem-cli resolve] runtime error: {e}");
            return 4;
        }
    };
    match runtime.block_on(resolver.resolve_from_query(query)) {
        Ok(resolution) => {
            print_json(&resolution);
            0
        }
        Err(ResolutionError::EmptyInput) => {
            eprintln!("{USAGE}");
            2
        }
        Err(e) => {
            eprintln!("[chem-cli resolve] {e}");
            4
        }
    }
}

fn main() {
    // Cargar .env si existe para obtener GEMINI_API_KEY
    let _ = dotenvy::dotenv();
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("{USAGE}");
        exit(2);
    }
    let text = args[2..].join(" ");

    let code = match args[1].as_str() {
        "sanitize" => match sanitize(text.as_str()) {
            Some(clean) => {
                println!("{clean}");
                0
            }
            None => 3,
        },
        "arrows" => {
            println!("{}", normalize_reaction_arrows(text.trim()));
            0
        }
        "strip-maps" => {
            println!("{}", strip_atom_mappings(text.trim()));
            0
        }
        "parse" => match ReactionResolver::new().resolve_heuristically(&encode_reaction_text(text.trim())) {
            Some(resolution) => {
                print_json(&resolution);
                0
            }
            None => {
                eprintln!("[chem-cli parse] not reaction SMILES: {}", text.trim());
                3
            }
        },
        "resolve" => resolve(&text),
        other => {
            eprintln!("comando desconocido: {other}\n{USAGE}");
            2
        }
    };
    exit(code);
}
