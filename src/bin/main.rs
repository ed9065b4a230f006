use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use slug_core::config::{default_config_path, Config};
use slug_core::SlugEngine;
use std::io::{stdin, stdout, Write};
use tracing_subscriber::EnvFilter;

fn main() -> slug_core::Result<()> {
    let config = Config::load(&default_config_path())?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    let mut engine = SlugEngine::from_file_or_new(&config.store_path);
    let mut last_input = String::new();
    let mut message = String::new();

    loop {
        print_ui(&engine, &last_input, &message)?;
        message.clear();

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim_end_matches(&['\r', '\n'][..]);

        match cmd {
            "exit" => break,
            s if s.starts_with(":resolve ") => {
                let args: Vec<&str> = s[":resolve ".len()..].splitn(2, ' ').collect();
                message = match args.as_slice() {
                    [taxonomy, slug] => match engine.resolve(slug, taxonomy) {
                        Some(resolved) => format!("{} -> {}", slug, resolved),
                        None => format!("{} does not resolve in {}", slug, taxonomy),
                    },
                    _ => "usage: :resolve <taxonomy> <slug>".to_string(),
                };
            }
            s if s.starts_with(":term ") => {
                let args: Vec<&str> = s[":term ".len()..].splitn(3, ' ').collect();
                message = match args.as_slice() {
                    [taxonomy, slug, name] => match engine.add_term(taxonomy, slug, name) {
                        Ok(()) => format!("added {} to {}", slug, taxonomy),
                        Err(e) => e.to_string(),
                    },
                    _ => "usage: :term <taxonomy> <slug> <name>".to_string(),
                };
            }
            s => last_input = s.to_string(),
        }
    }

    println!("\nSaving site...");
    match engine.save() {
        Ok(()) => println!("Site saved to '{}'", config.store_path.display()),
        Err(e) => eprintln!("{} Could not save site: {}", "[ERROR]".red(), e),
    }
    Ok(())
}

fn print_ui(engine: &SlugEngine, last_input: &str, message: &str) -> slug_core::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", "Persian Slug Transliterator".bold());
    println!("---------------------------------------------------------------");
    println!("Type a title and press [Enter] to see its slug.");
    println!("':resolve <taxonomy> <slug>', ':term <taxonomy> <slug> <name>', 'exit' to save and quit.\n");

    if !last_input.is_empty() {
        let report = engine.inspect(last_input);
        println!("Input: [{}]", last_input);
        if report.slug.is_empty() {
            println!("Slug  -> {}", "(empty, keep the original)".yellow());
        } else {
            println!("Slug  -> {}", report.slug.as_str().green());
        }
        println!("Latin slug already: {}", flag(report.is_latin_slug));
        println!("Persian/Arabic script: {}", flag(report.has_persian_or_arabic));
    }

    if !message.is_empty() {
        println!("\n{}", message.cyan());
    }
    print!("\n> ");
    out.flush()?;
    Ok(())
}

fn flag(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".dark_grey().to_string()
    }
}
