use tracedash::{cli::cli_parser::parse_cli, errors::TdError};

fn main() -> Result<(), TdError> {
    let runner = parse_cli()?;
    runner.run()
}
