use podtrack::api::ApiError;
use podtrack::cli::run;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    #[cfg(windows)]
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        // API errors know which side they are on; everything else goes by message
        let internal = match e.downcast_ref::<ApiError>() {
            Some(api_err) => !api_err.is_user_facing(),
            None => {
                let error_str: String = e.to_string();
                error_str.contains("database") || error_str.contains("SQLite") ||
                    error_str.contains("Failed to")
            }
        };

        if internal {
            eprintln!("Internal error: {}", e);
            // Show error chain if available
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut indent = 1;
                while let Some(err) = source {
                    eprintln!("{:indent$}  {}", "", err);
                    source = err.source();
                    indent += 1;
                }
            }
            std::process::exit(2);
        } else {
            // User error
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
