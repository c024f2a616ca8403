use std::process::ExitCode;

fn main() -> ExitCode {
    match apismoke::entry::probe_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            apismoke::entry::report_error(&err);
            ExitCode::FAILURE
        }
    }
}
