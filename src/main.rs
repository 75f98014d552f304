use std::process;

fn main() {
    if let Err(e) = contextkeeper::cli::run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
