use rbot::cli;
use rbot::driver::DryRunDriver;
use rbot::script::Engine;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("rbot: {e}");
            eprintln!("Usage: rbot [-n] <script-file>");
            std::process::exit(1);
        }
    };

    let script = match std::fs::read_to_string(&args.script) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("rbot: cannot read {}: {e}", args.script.display());
            std::process::exit(1);
        }
    };

    let result = if args.dry_run {
        Engine::new(DryRunDriver::echoing()).run(&script)
    } else {
        run_system(&script)
    };

    if let Err(e) = result {
        eprintln!("rbot: {e}");
        std::process::exit(1);
    }
}

#[cfg(feature = "system")]
fn run_system(script: &str) -> Result<(), String> {
    let driver = rbot::system::SystemDriver::new()?;
    Engine::new(driver).run(script)
}

/// Without the `system` feature there is no OS backend; fall back to the
/// dry-run driver so scripts remain inspectable.
#[cfg(not(feature = "system"))]
fn run_system(script: &str) -> Result<(), String> {
    eprintln!("rbot: built without the `system` feature; running in dry-run mode");
    Engine::new(DryRunDriver::echoing()).run(script)
}
