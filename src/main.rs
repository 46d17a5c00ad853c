use std::process::ExitCode;

fn main() -> ExitCode {
    match moving_mnist::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
