use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut yaml = false;
    let mut turns: i32 = 0;
    let mut positional: Vec<&String> = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--list" => {
                for name in modal::common_scales().keys() {
                    println!("{}", name);
                }
                return;
            }
            "--yaml" => yaml = true,
            "--rotate" => {
                let value = match iter.next() {
                    Some(value) => value,
                    None => {
                        eprintln!("--rotate requires a number of turns");
                        process::exit(1);
                    }
                };
                turns = match value.parse() {
                    Ok(turns) => turns,
                    Err(_) => {
                        eprintln!("Invalid turn count '{}'", value);
                        process::exit(1);
                    }
                };
            }
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() || positional.len() > 2 {
        eprintln!("Usage: modal [--yaml] [--rotate <turns>] <scale> [tonic]");
        eprintln!("       modal --list");
        process::exit(1);
    }

    let input = positional[0];
    let tonic = positional.get(1).map(|s| s.as_str());

    match run(input, tonic, turns, yaml) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(
    input: &str,
    tonic: Option<&str>,
    turns: i32,
    yaml: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut scale = modal::Scale::parse(input)?;
    if let Some(name) = tonic {
        scale = scale.with_tonic_name(name)?;
    }
    if turns != 0 {
        scale = modal::rotate(&scale, turns)?;
    }
    if yaml {
        let report = modal::pretty::report(&scale)?;
        Ok(serde_yaml::to_string(&report)?)
    } else {
        Ok(modal::pretty::describe(&scale)?)
    }
}
