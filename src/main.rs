use std::io;

fn main() -> io::Result<()> {
    let stdout = io::stdout();
    boolwidth::write_report(stdout.lock())
}
