use ldml_mapper::{Compatibility, LdmlDataMapper, LdmlError, WritingSystemDefinition};
use log::info;
use std::env;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Ldml(#[from] LdmlError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn usage(program: &str) -> ! {
    eprintln!("Reads and rewrites LDML writing system definitions.");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} show <file.ldml>", program);
    eprintln!("  {} rewrite <in.ldml> <out.ldml> [--legacy]", program);
    std::process::exit(1);
}

fn main() -> Result<(), CliError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ldml-mapper");
    let mapper = LdmlDataMapper::new();

    match args.get(1).map(String::as_str) {
        Some("show") if args.len() == 3 => {
            let mut ws = WritingSystemDefinition::new();
            mapper.read_path(&args[2], &mut ws)?;
            println!("{}", serde_json::to_string_pretty(&ws)?);
        }
        Some("rewrite") if args.len() == 4 || args.len() == 5 => {
            let compatibility = match args.get(4).map(String::as_str) {
                None => Compatibility::Strict,
                Some("--legacy") => Compatibility::LegacyPrivateUse,
                Some(_) => usage(program),
            };
            let input = Path::new(&args[2]);
            let output = &args[3];

            let mut ws = WritingSystemDefinition::new();
            mapper.read_path(input, &mut ws)?;
            info!("Read '{}' from {}", ws.id(), input.display());
            mapper.write_path(output, &mut ws, Some(input), compatibility)?;
            println!("Wrote {}", output);
        }
        _ => usage(program),
    }
    Ok(())
}
