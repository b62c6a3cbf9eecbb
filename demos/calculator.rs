use cmdbind::derive::*;
use cmdbind::{Registry, Sinks};
use std::error::Error;
use std::io::{self, BufRead, Write};

/// Sum the numbers, optionally negating the result.
#[command]
fn plus(a: i64, b: i64, #[arg(default = 0)] c: i64, invert: bool) -> i64 {
    let sum = a + b + c;

    if invert {
        -sum
    } else {
        sum
    }
}

#[command]
fn div(a: f64, b: f64) -> Result<f64, String> {
    if b == 0.0 {
        Err("cannot divide by zero".to_string())
    } else {
        Ok(a / b)
    }
}

#[command(name = "greet")]
fn greeting(out: &mut dyn Write, name: String, title: Option<String>) -> io::Result<()> {
    match title {
        Some(title) => writeln!(out, "Hello, {title} {name}!"),
        None => writeln!(out, "Hello, {name}!"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut registry = Registry::new();
    registry.install::<PlusCommand>()?;
    registry.install::<DivCommand>()?;
    registry.install::<GreetingCommand>()?;

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    for line in io::stdin().lock().lines() {
        let line = line?;

        if line.trim() == "help" {
            for name in registry.names() {
                println!("{}", registry.usage(name).unwrap_or_default());
            }

            continue;
        }

        if let Err(error) = registry.evaluate(&line, &mut Sinks::new(&mut stdout, &mut stderr)) {
            eprintln!("{error}");

            if let Some(context) = error.error_context(&line) {
                eprintln!("{context}");
            }
        }
    }

    Ok(())
}
