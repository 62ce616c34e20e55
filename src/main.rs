use anyhow::Context;
use clap::Parser;
use keuzetool::config::cli::{Cli, Command, FileStore};
use keuzetool::config::CatalogConfig;
use keuzetool::core::codec;
use keuzetool::core::filter_url::{advice_url, build_filter_url};
use keuzetool::core::wizard::{self, Step, WizardEngine};
use keuzetool::domain::model::{Advice, CompetenceLevel, ContactPreference, ModulePick};
use keuzetool::utils::{logger, validation::Validate};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = cli.validate() {
        tracing::error!("Invalid command line arguments: {}", e);
        eprintln!("Invalid command line arguments: {}", e);
        std::process::exit(1);
    }

    let config = match &cli.config {
        Some(path) => CatalogConfig::from_file(path)
            .with_context(|| format!("loading catalog config from {}", path.display()))?,
        None => CatalogConfig::embedded()?,
    };

    if let Err(e) = config.validate() {
        tracing::error!("Catalog configuration is invalid: {}", e);
        eprintln!("Invalid catalog configuration: {}", e);
        std::process::exit(1);
    }

    let store = FileStore::new(&cli.state_dir);

    match cli.command {
        Command::Run => run_wizard(config, store)?,
        Command::Url { tracks, modules } => {
            let picks: Vec<ModulePick> = modules
                .iter()
                .map(|entry| match config.module(entry) {
                    Some(module) => ModulePick::Module(module.clone()),
                    None => ModulePick::Label(entry.clone()),
                })
                .collect();
            println!("{}", build_filter_url(&config, &tracks, &picks));
        }
        Command::Decode { token } => match codec::decode_advice(&token) {
            Ok(advice) => println!("{}", serde_json::to_string_pretty(&advice)?),
            Err(e) => {
                eprintln!("Could not decode token: {}", e);
                std::process::exit(2);
            }
        },
        Command::History => {
            let history = wizard::load_history(&store);
            if history.is_empty() {
                println!("No completed advice sessions yet.");
            } else {
                for advice in &history {
                    println!(
                        "{}  {:<20} tracks: {:<8} modules: {}",
                        advice.created_at.format("%Y-%m-%d %H:%M"),
                        advice.selection.name,
                        advice.selection.interests.join(","),
                        advice.recommended.len()
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_wizard(config: CatalogConfig, store: FileStore) -> anyhow::Result<()> {
    let mut engine = WizardEngine::resume_or_new(store, config);
    if engine.step() != Step::Identity {
        println!(
            "Welkom terug! Je sessie gaat verder bij stap '{}'.",
            engine.step().name()
        );
    } else {
        println!("Welkom bij de keuzetool. Beantwoord de vragen; laat leeg om over te slaan.");
    }

    loop {
        match engine.step() {
            Step::Identity => {
                let name = ask("Wat is je naam")?;
                if !name.is_empty() {
                    engine.set_name(&name);
                }
                let email = ask("Wat is je e-mailadres")?;
                if !email.is_empty() {
                    engine.set_email(&email);
                }
                advance(&mut engine);
            }
            Step::Background => {
                let background = ask("Wat is je (technische) achtergrond")?;
                if !background.is_empty() {
                    engine.set_background(&background);
                }
                let role = ask("Wat is je huidige functie")?;
                if !role.is_empty() {
                    engine.set_role(&role);
                }
                advance(&mut engine);
            }
            Step::Interests => {
                println!("Welke richtingen spreken je aan?");
                for track in engine.config().tracks() {
                    println!("  [{}] {}", track.code, track.label);
                }
                let answer = ask("Codes, gescheiden door komma's (bv. A,C)")?;
                for code in answer.split(',').map(str::trim).filter(|c| !c.is_empty()) {
                    engine.toggle_interest(code);
                }
                advance(&mut engine);
            }
            Step::Competences => {
                let interests = engine.selection().interests.clone();
                let relevant: Vec<_> = engine
                    .config()
                    .modules()
                    .iter()
                    .filter(|m| m.tracks.iter().any(|c| interests.contains(c)))
                    .cloned()
                    .collect();
                if relevant.is_empty() {
                    println!("Geen modules gevonden bij je interesses; we slaan deze stap over.");
                } else {
                    println!("Hoe bekend ben je al met deze onderwerpen?");
                    println!("  1 = nieuw voor mij, 2 = enige ervaring, 3 = beheers ik al");
                }
                for module in relevant {
                    let answer = ask(&format!("{} [1/2/3]", module.label))?;
                    let level = match answer.as_str() {
                        "1" => Some(CompetenceLevel::NotFamiliar),
                        "2" => Some(CompetenceLevel::SomeExperience),
                        "3" => Some(CompetenceLevel::Skilled),
                        _ => None,
                    };
                    if let Some(level) = level {
                        engine.set_competence(&module.key, level);
                    }
                }
                advance(&mut engine);
            }
            Step::Contact => {
                let answer = ask("Wil je dat een adviseur contact opneemt? [j/n]")?;
                match answer.to_lowercase().as_str() {
                    "j" | "ja" | "y" | "yes" => {
                        engine.set_contact_preference(ContactPreference::Yes)
                    }
                    "n" | "nee" | "no" => engine.set_contact_preference(ContactPreference::No),
                    _ => {}
                }
                advance(&mut engine);
            }
            Step::Result => {
                let advice = engine.finalize();
                print_advice(&engine, &advice);
                // A finished session starts over next time; history keeps
                // the completed advice.
                engine.reset();
                break;
            }
        }
    }

    Ok(())
}

fn print_advice<S: keuzetool::core::StateStore>(engine: &WizardEngine<S>, advice: &Advice) {
    println!();
    println!("Jouw persoonlijke advies");
    println!("------------------------");

    let labels: Vec<&str> = advice
        .recommended
        .iter()
        .filter_map(|key| engine.config().module(key))
        .map(|module| module.label.as_str())
        .collect();
    if labels.is_empty() {
        println!("Geen specifieke modules; bekijk het volledige aanbod.");
    } else {
        println!("Aanbevolen modules:");
        println!("  - {}", format_bulleted(&labels));
    }

    println!();
    println!("Bekijk je aanbod: {}", advice_url(engine.config(), advice));

    match codec::encode_advice(advice) {
        Ok(token) => println!("Deelbare code: {}", token),
        Err(e) => tracing::warn!("could not encode share token: {}", e),
    }
}

fn format_bulleted(labels: &[&str]) -> String {
    labels.join("\n  - ")
}

/// Re-runs the current step's prompts when a required field is still
/// missing; any other outcome moves on.
fn advance<S: keuzetool::core::StateStore>(engine: &mut WizardEngine<S>) {
    if let Err(e) = engine.try_next() {
        println!("{}", e);
    }
}

fn ask(prompt: &str) -> io::Result<String> {
    print!("{}: ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
