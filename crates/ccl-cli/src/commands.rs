use anyhow::Context;
use ccl_ledger::{LedgerConfig, Response};
use colored::Colorize;

use crate::cli::*;
use crate::host::{load_config, Host};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Demo(args) => cmd_demo(config, args, cli.format),
        Command::Script(args) => cmd_script(config, args, cli.format),
        Command::Invoke(args) => cmd_invoke(config, args, cli.format),
        Command::Config => cmd_config(&config),
    }
}

fn cmd_demo(config: LedgerConfig, args: DemoArgs, format: OutputFormat) -> anyhow::Result<()> {
    let host = Host::new(config, args.host.funds)?;
    let id = args.container.as_str();

    host.run("initLedger", &[])?;
    println!("{} Ledger bootstrapped", "✓".green().bold());

    host.run(
        "recordContainer",
        &strings(&[id, "Kiwis", "-36.8485, 174.7633", "Producer"]),
    )?;
    println!("{} Recorded container {}", "✓".green().bold(), id.yellow());

    for holder in ["Freight Forwarder", "Customs", "Shipper", "Retailer"] {
        let response = host.run("changeContainerHolder", &strings(&[id, holder]))?;
        if let Response::Text(message) = response {
            println!("  {} → {} ({})", id.yellow(), holder.bold(), message.dimmed());
        }
    }

    let view = host.run("queryContainer", &strings(&[id]))?;
    print_response("queryContainer", view, format);

    let audit = host.run("auditContainer", &strings(&[id]))?;
    print_response("auditContainer", audit, format);
    Ok(())
}

fn cmd_script(config: LedgerConfig, args: ScriptArgs, format: OutputFormat) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("cannot read {}", args.path.display()))?;
    let operations = parse_script(&text)?;
    let host = Host::new(config, args.host.funds)?;

    let mut failures = 0usize;
    for (operation, op_args) in &operations {
        match host.run(operation, op_args) {
            Ok(response) => print_response(operation, response, format),
            Err(err) if !args.fail_fast => {
                failures += 1;
                println!("{} {:#}", "✗".red().bold(), err);
            }
            Err(err) => return Err(err),
        }
    }

    let summary = format!("{} operations, {} failed", operations.len(), failures);
    if failures == 0 {
        println!("{} {}", "✓".green().bold(), summary);
    } else {
        println!("{} {}", "!".yellow().bold(), summary);
    }
    Ok(())
}

fn cmd_invoke(config: LedgerConfig, args: InvokeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let host = Host::new(config, args.host.funds)?;
    if !args.no_init && args.operation != "initLedger" {
        host.run("initLedger", &[])?;
    }
    let response = host.run(&args.operation, &args.args)?;
    print_response(&args.operation, response, format);
    Ok(())
}

fn cmd_config(config: &LedgerConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn print_response(operation: &str, response: Response, format: OutputFormat) {
    match (response, format) {
        (Response::Empty, _) => println!("{} {}", "✓".green().bold(), operation),
        (Response::Text(text), _) => println!("{} {}", "✓".green().bold(), text),
        (Response::Json(value), OutputFormat::Json) => println!("{value}"),
        (Response::Json(value), OutputFormat::Text) => {
            println!("{} {}", "✓".green().bold(), operation.bold());
            match serde_json::to_string_pretty(&value) {
                Ok(pretty) => println!("{pretty}"),
                Err(_) => println!("{value}"),
            }
        }
    }
}

/// Parse a script: one JSON array of strings per line, operation name first.
/// Blank lines and lines starting with `#` are skipped.
fn parse_script(text: &str) -> anyhow::Result<Vec<(String, Vec<String>)>> {
    let mut operations = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut words: Vec<String> = serde_json::from_str(line)
            .with_context(|| format!("line {}: expected a JSON array of strings", number + 1))?;
        if words.is_empty() {
            anyhow::bail!("line {}: missing operation name", number + 1);
        }
        let operation = words.remove(0);
        operations.push((operation, words));
    }
    Ok(operations)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
