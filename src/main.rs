// src/main.rs

use ecsrun::{cli, logging, report, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = match cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(cli::parse_error_exit_code(&err));
        }
    };
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("ecsrun error: {err:?}");
        std::process::exit(1);
    }

    let code = match run(args).await {
        Ok(report) => {
            println!("{}", report::render_report(&report));
            report.exit_code()
        }
        Err(err) => {
            eprintln!("{}", report::render_error(&err));
            1
        }
    };

    std::process::exit(code);
}
