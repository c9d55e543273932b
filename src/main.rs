use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: chordkit <chord.yaml> [output.yaml]");
        process::exit(1);
    }

    let input_path = &args[1];
    let output_path: Option<&String> = args.get(2);

    // Read input file
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let yaml = match chordkit::process(&source) {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("Chord error: {}", e);
            process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &yaml) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote chord to {}", path);
        }
        None => {
            print!("{}", yaml);
        }
    }
}
