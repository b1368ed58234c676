use std::process::ExitCode;

fn main() -> ExitCode {
    daybook::run(std::env::args().skip(1))
}
