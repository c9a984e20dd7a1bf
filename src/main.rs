use std::env;

fn main() {
    if let Err(err) = unit_converter::cli::run(env::args_os()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
