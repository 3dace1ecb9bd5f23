//! Matchwood CLI entry point.
//!
//! Runs the bundled recipe-scaling rule pack over demo facts (or a loaded
//! working-memory snapshot), prints the results, and optionally drops into
//! the explanation shell.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use matchwood_engine::{ConflictStrategy, Pattern, Rule};
use matchwood_foundation::{Error, Fact, Value};
use matchwood_runtime::{Repl, Session, serialize};

/// CLI configuration parsed from arguments.
struct CliConfig {
    strategy: ConflictStrategy,
    max_firings: Option<u32>,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
    explain: bool,
    trace: bool,
    interactive: bool,
    show_help: bool,
    show_version: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            strategy: ConflictStrategy::default(),
            max_firings: None,
            load: None,
            save: None,
            explain: false,
            trace: false,
            interactive: false,
            show_help: false,
            show_version: false,
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-i" | "--interactive" => config.interactive = true,
            "--explain" => config.explain = true,
            "--trace" => config.trace = true,
            "--strategy" => {
                i += 1;
                let value = args.get(i).ok_or("--strategy requires a value")?;
                config.strategy = value.parse()?;
            }
            "--max-firings" => {
                i += 1;
                let value = args.get(i).ok_or("--max-firings requires a value")?;
                config.max_firings = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --max-firings value: {value}"))?,
                );
            }
            "--load" => {
                i += 1;
                let value = args.get(i).ok_or("--load requires a path")?;
                config.load = Some(PathBuf::from(value));
            }
            "--save" => {
                i += 1;
                let value = args.get(i).ok_or("--save requires a path")?;
                config.save = Some(PathBuf::from(value));
            }
            arg => {
                return Err(format!("unknown option: {arg}").into());
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("matchwood {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut session = Session::new().with_strategy(config.strategy);
    if let Some(max) = config.max_firings {
        session = session.with_max_firings(max);
    }

    install_scaling_rules(&mut session)?;

    if let Some(path) = &config.load {
        session.set_memory(serialize::load_from_file(path)?);
        println!("loaded {} facts from {}", session.memory().len(), path.display());
    } else {
        assert_demo_facts(&mut session);
    }

    session.run_all()?;

    print_results(&session, config.explain)?;

    if config.trace {
        println!("\nfire log:");
        print!("{}", session.fire_trace());
    }

    if let Some(path) = &config.save {
        serialize::save_to_file(session.memory(), path)?;
        println!("saved {} facts to {}", session.memory().len(), path.display());
    }

    if config.interactive {
        let mut repl = Repl::new(session)?;
        repl.run(&mut std::io::stdout())?;
    }

    Ok(())
}

/// Installs the recipe-scaling rule pack and its lookup tables.
fn install_scaling_rules(session: &mut Session) -> Result<(), Error> {
    session.add_reference_facts(vec![
        Fact::new("known").with("name", "SALT").with("class", "SEASONING"),
        Fact::new("known").with("name", "PEPPER").with("class", "SEASONING"),
        Fact::new("known").with("name", "FLOUR").with("class", "BASE"),
        Fact::new("known").with("name", "SUGAR").with("class", "BASE"),
        Fact::new("scale-factor").with("class", "SEASONING").with("factor", 0.8),
        Fact::new("scale-factor").with("class", "BASE").with("factor", 1.0),
        Fact::new("scale-factor").with("class", "OTHER").with("factor", 1.0),
    ]);

    session.add_rules(vec![
        Rule::new("classify-known-ingredient")
            .with_antecedent(Pattern::new("ingredient").with("name", "?name"))
            .with_antecedent(Pattern::new("known").with("name", "?name").with("class", "?class"))
            .with_negation(Pattern::new("classified").with("name", "?name"))
            .with_consequent(
                Pattern::new("classified").with("name", "?name").with("class", "?class"),
            )
            .with_priority(100),
        Rule::new("classify-default-ingredient")
            .with_antecedent(Pattern::new("ingredient").with("name", "?name"))
            .with_negation(Pattern::new("classified").with("name", "?name"))
            .with_consequent(
                Pattern::new("classified").with("name", "?name").with("class", "OTHER"),
            )
            .with_priority(50),
        Rule::new("calculate-scaling-multiplier")
            .with_antecedent(Pattern::new("classified").with("name", "?name").with("class", "?class"))
            .with_antecedent(Pattern::new("scaling-request").with("target", "?target"))
            .with_antecedent(Pattern::new("scale-factor").with("class", "?class").with("factor", "?factor"))
            .with_negation(Pattern::new("scaling-multiplier").with("name", "?name"))
            .with_action(|mut bindings, _wm, _kb, _out| {
                let target = bindings
                    .get("?target")
                    .and_then(Value::as_number)
                    .ok_or_else(|| Error::action_failed(
                        "calculate-scaling-multiplier",
                        "scaling-request target is not numeric",
                    ))?;
                let factor = bindings
                    .get("?factor")
                    .and_then(Value::as_number)
                    .ok_or_else(|| Error::action_failed(
                        "calculate-scaling-multiplier",
                        "scale factor is not numeric",
                    ))?;
                bindings.set("?multiplier", target * factor);
                Ok(bindings)
            })
            .with_consequent(
                Pattern::new("scaling-multiplier")
                    .with("name", "?name")
                    .with("value", "?multiplier"),
            )
            .with_priority(200),
        Rule::new("scale-ingredient-amount")
            .with_antecedent(
                Pattern::new("scaling-multiplier").with("name", "?name").with("value", "?multiplier"),
            )
            .with_antecedent(
                Pattern::new("ingredient")
                    .with("name", "?name")
                    .with("amount", "?amount")
                    .with("unit", "?unit"),
            )
            .with_negation(Pattern::new("scaled-ingredient").with("name", "?name"))
            .with_action(|mut bindings, _wm, _kb, _out| {
                let amount = bindings
                    .get("?amount")
                    .and_then(Value::as_number)
                    .ok_or_else(|| Error::action_failed(
                        "scale-ingredient-amount",
                        "ingredient amount is not numeric",
                    ))?;
                let multiplier = bindings
                    .get("?multiplier")
                    .and_then(Value::as_number)
                    .ok_or_else(|| Error::action_failed(
                        "scale-ingredient-amount",
                        "scaling multiplier is not numeric",
                    ))?;
                bindings.set("?scaled", amount * multiplier);
                Ok(bindings)
            })
            .with_consequent(
                Pattern::new("scaled-ingredient")
                    .with("name", "?name")
                    .with("amount", "?scaled")
                    .with("unit", "?unit"),
            )
            .with_priority(300),
    ])
}

/// Demo recipe: double a two-ingredient recipe.
fn assert_demo_facts(session: &mut Session) {
    session.assert(Fact::new("scaling-request").with("target", 2.0));
    session.assert(
        Fact::new("ingredient")
            .with("name", "SALT")
            .with("amount", 1.0)
            .with("unit", "TEASPOONS"),
    );
    session.assert(
        Fact::new("ingredient")
            .with("name", "FLOUR")
            .with("amount", 2.0)
            .with("unit", "CUPS"),
    );
}

fn print_results(session: &Session, explain: bool) -> Result<(), Error> {
    let scaled = session.memory().query("scaled-ingredient", &[]);
    if scaled.is_empty() {
        println!("no scaled ingredients derived");
        return Ok(());
    }

    println!("scaled ingredients:");
    let ids: Vec<_> = scaled.iter().filter_map(|fact| fact.id()).collect();
    for fact in &scaled {
        println!("  {fact}");
    }

    if explain {
        for id in ids {
            println!();
            print!("{}", session.explain(id)?);
        }
    }

    Ok(())
}

fn print_help() {
    println!("matchwood - forward-chaining production-rule engine");
    println!();
    println!("Usage: matchwood [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --strategy <S>      conflict strategy: priority, specificity, recency");
    println!("  --max-firings <N>   firing cap per run (default 10000)");
    println!("  --load <FILE>       load a working-memory snapshot instead of demo facts");
    println!("  --save <FILE>       save working memory after the run");
    println!("  --explain           print proof trees for derived results");
    println!("  --trace             print the fire log after the run");
    println!("  -i, --interactive   open the explanation shell after the run");
    println!("  -h, --help          show this help");
    println!("  -V, --version       show version");
}
