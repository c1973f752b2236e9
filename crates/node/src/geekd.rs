fn main() {
    if let Err(err) = geekd::run_entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
