use std::process::ExitCode;

fn main() -> ExitCode {
    match apismoke::entry::suite_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            apismoke::entry::report_error(&err);
            ExitCode::FAILURE
        }
    }
}
