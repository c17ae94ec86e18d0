fn main() {
    if let Err(err) = mcd_describe::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
