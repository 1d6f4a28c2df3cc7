use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::app::{ApplicationCommand, ApplicationOutput, ClientConfig};
use clap::{arg, command, Command};

fn parse_output_format(value: &str) -> Result<ApplicationOutput, String> {
    match value {
        "json" => Ok(ApplicationOutput::Json),
        "binary" => Ok(ApplicationOutput::Binary),
        _ => Err(format!(
            "Unknown format {value}, only json and binary is allowed"
        )),
    }
}

fn parse_config_file_location(value: &str) -> Result<ClientConfig, String> {
    let path: PathBuf = match value.parse() {
        Ok(path) => path,
        _ => return Err(format!("Cannot parse {value} as file path")),
    };

    if !path.exists() || !path.is_file() {
        return Err(format!("Configuration file {value} does not exists"));
    }

    let extension_error = format!("Configuration {value} file does not have extension");

    let extension = path
        .extension()
        .ok_or(extension_error.clone())?
        .to_str()
        .ok_or(extension_error)?;

    match extension {
        "toml" => {
            let mut value = String::new();

            File::open(path)
                .map_err(|e| e.to_string())?
                .read_to_string(&mut value)
                .map_err(|e| e.to_string())?;

            toml::from_str(&value).map_err(|e| e.to_string())
        }
        "json" => serde_json::from_reader(File::open(path).map_err(|e| e.to_string())?)
            .map_err(|e| e.to_string()),
        _ => Err(format!("Configuration file {value} is not supported")),
    }
}

fn cli_command() -> Command {
    command!()
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            arg!(--"config" <CONFIG>)
                .required(true)
                .value_parser(parse_config_file_location),
        )
        .subcommand(Command::new("check").about("Validates configuration and transport setup"))
        .subcommand(
            Command::new("watch")
                .about("Streams twin changes to standard output")
                .arg(
                    arg!(--"output" <FORMAT>)
                        .required(false)
                        .value_parser(parse_output_format),
                ),
        )
}

pub fn command_from_cli() -> ApplicationCommand {
    let command = cli_command().get_matches();

    let configuration = command.get_one::<ClientConfig>("config").unwrap().clone();

    match command.subcommand().unwrap() {
        ("check", _) => ApplicationCommand::Check(configuration),
        ("watch", args) => ApplicationCommand::Watch(
            configuration,
            args.get_one::<ApplicationOutput>("output")
                .copied()
                .unwrap_or_default(),
        ),
        _ => unreachable!(),
    }
}
