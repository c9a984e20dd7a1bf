use std::ffi::OsString;

fn main() {
    let mut args: Vec<OsString> = std::env::args_os().collect();
    if args.is_empty() {
        args.push(OsString::from("unit-converter-history"));
    }
    args.insert(1, OsString::from("history"));
    if let Err(err) = unit_converter::cli::run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
