// src/main.rs

use bulkcheck::errors::BulkcheckError;
use bulkcheck::{cli, logging, run};

fn main() {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("bulkcheck: {err}");
    }

    match run(&args) {
        Ok(_) => {}
        Err(err @ BulkcheckError::Rejected(_)) => {
            eprintln!("bulkcheck: {err}");
            std::process::exit(1);
        }
        Err(err @ BulkcheckError::MalformedSetting(_)) => {
            eprintln!("bulkcheck: {err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("bulkcheck error: {err:?}");
            std::process::exit(1);
        }
    }
}
