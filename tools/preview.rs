/// Preview — interactive generation shell for testing lexicons and
/// rulesets.
///
/// Usage: preview --syllables <path> [--ruleset <path>] [--seed <n>]
///
/// Commands:
///   gen [kind]              — generate a fresh name
///   derive <name> [kind]    — derive from an existing name
///   seed <n>                — set the RNG seed
///   bulk <n>                — generate n names with the current seed range
///   kinds                   — list name kinds
///   help                    — list commands
///   quit                    — exit

use namelore::core::derivation::DerivationEngine;
use namelore::core::generator::NameGenerator;
use namelore::core::rules::Ruleset;
use namelore::core::store::SyllableStore;
use namelore::schema::request::{GenerationRequest, NameKind};
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut syllables_path = None;
    let mut ruleset_path = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--syllables" if i + 1 < args.len() => {
                i += 1;
                syllables_path = Some(args[i].clone());
            }
            "--ruleset" if i + 1 < args.len() => {
                i += 1;
                ruleset_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let store = match syllables_path {
        Some(ref path) => match SyllableStore::load_from_ron(Path::new(path)) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Failed to load syllables from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            eprintln!("--syllables is required");
            print_usage();
            std::process::exit(1);
        }
    };

    println!("Loaded {} syllables", store.len());

    let mut generator = NameGenerator::new(store);
    if let Some(ref path) = ruleset_path {
        match Ruleset::load_from_ron(Path::new(path)) {
            Ok(ruleset) => {
                println!("Loaded ruleset '{}' ({} rules)", ruleset.id, ruleset.rules().len());
                generator = generator.with_derivation(DerivationEngine::new(ruleset));
            }
            Err(e) => {
                eprintln!("Failed to load ruleset from {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    let mut current_seed = seed;
    println!("Seed: {}", current_seed);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "kinds" => {
                println!("person, place, place_adjective, place_resident, title, artifact, organization");
            }
            "seed" => {
                if parts.len() < 2 {
                    println!("Current seed: {}", current_seed);
                    continue;
                }
                match parts[1].parse() {
                    Ok(n) => {
                        current_seed = n;
                        println!("Seed set to {}", current_seed);
                    }
                    Err(_) => println!("Not a number: {}", parts[1]),
                }
            }
            "gen" => {
                let kind = match parts.get(1) {
                    Some(raw) => match parse_kind(raw) {
                        Some(k) => k,
                        None => {
                            println!("Unknown kind: {} (try 'kinds')", raw);
                            continue;
                        }
                    },
                    None => NameKind::Place,
                };
                let request = GenerationRequest::for_kind(kind).with_seed(current_seed);
                run_request(&generator, &request);
                current_seed += 1;
            }
            "derive" => {
                if parts.len() < 2 {
                    println!("Usage: derive <name> [kind]");
                    continue;
                }
                let kind = match parts.get(2) {
                    Some(raw) => match parse_kind(raw) {
                        Some(k) => k,
                        None => {
                            println!("Unknown kind: {} (try 'kinds')", raw);
                            continue;
                        }
                    },
                    None => NameKind::PlaceAdjective,
                };
                let request = GenerationRequest::for_kind(kind)
                    .with_base_name(parts[1])
                    .with_seed(current_seed);
                run_request(&generator, &request);
            }
            "bulk" => {
                let n: u64 = parts.get(1).and_then(|p| p.parse().ok()).unwrap_or(10);
                for offset in 0..n {
                    let request = GenerationRequest::for_kind(NameKind::Place)
                        .with_seed(current_seed + offset);
                    match generator.generate(&request) {
                        Ok(result) => println!("  {}", result.name),
                        Err(e) => println!("  ERROR: {}", e),
                    }
                }
                current_seed += n;
            }
            _ => {
                println!("Unknown command: {} (try 'help')", cmd);
            }
        }
    }
}

fn run_request(generator: &NameGenerator, request: &GenerationRequest) {
    match generator.generate(request) {
        Ok(result) => {
            println!("\n  {}", result.name);
            if !result.metadata.used_syllables.is_empty() {
                println!("  syllables: {}", result.metadata.used_syllables.join(" + "));
            }
            if !result.metadata.applied_rules.is_empty() {
                println!("  rules: {}", result.metadata.applied_rules.join(", "));
            }
            let v = result.impression;
            println!(
                "  impression: hard {:.2}  sharp {:.2}  antique {:.2}  formal {:.2}  mystic {:.2}\n",
                v.hardness, v.sharpness, v.antiquity, v.formality, v.mysticism
            );
        }
        Err(e) => {
            println!("ERROR: {}", e);
        }
    }
}

fn parse_kind(raw: &str) -> Option<NameKind> {
    match raw.to_lowercase().as_str() {
        "person" => Some(NameKind::Person),
        "place" => Some(NameKind::Place),
        "place_adjective" | "adjective" => Some(NameKind::PlaceAdjective),
        "place_resident" | "resident" => Some(NameKind::PlaceResident),
        "title" => Some(NameKind::Title),
        "artifact" => Some(NameKind::Artifact),
        "organization" => Some(NameKind::Organization),
        _ => None,
    }
}

fn print_usage() {
    println!("Usage: preview --syllables <path> [--ruleset <path>] [--seed <n>]");
    println!();
    println!("Example:");
    println!("  preview --syllables lexicon_data/fantasy/syllables.ron \\");
    println!("          --ruleset lexicon_data/rulesets/fantasy.ron");
}

fn print_help() {
    println!("Commands:");
    println!("  gen [kind]            generate a fresh name (default kind: place)");
    println!("  derive <name> [kind]  derive from an existing name (default: place_adjective)");
    println!("  seed <n>              set the RNG seed");
    println!("  bulk <n>              generate n names from consecutive seeds");
    println!("  kinds                 list name kinds");
    println!("  help                  this text");
    println!("  quit                  exit");
}
