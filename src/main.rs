fn main() {
    if let Err(e) = freeblock::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
