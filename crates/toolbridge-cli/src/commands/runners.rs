use super::{json_pretty, EXIT_SUCCESS};
use toolbridge_core::{select_runner, RUNNER_NAMES};

pub fn run(json: bool) -> Result<u8, String> {
    // Construct each runner once so a name never lists without working.
    let mut names = Vec::new();
    for name in RUNNER_NAMES {
        let runner = select_runner(name).map_err(|e| e.to_string())?;
        names.push(runner.name().to_owned());
    }

    if json {
        println!("{}", json_pretty(&names)?);
    } else {
        for name in &names {
            println!("{name}");
        }
    }
    Ok(EXIT_SUCCESS)
}
