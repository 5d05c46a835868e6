use crate::commands::{self, CommandResult, config::ConfigAction};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// グローバルフラグ: 機械可読出力
pub const MACHINE_FLAG: &str = "--machine";

/// 解析済みのコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Export {
        sheet_path: String,
        folder: Option<PathBuf>,
    },
    Read {
        mapping_path: String,
        product_ids: Vec<String>,
    },
    Config(ConfigAction),
    Help,
}

/// CLI引数を解析し、適切なコマンドにディスパッチする
pub fn parse_args(args: &[String]) -> Result<CommandResult> {
    match parse_command(args)? {
        Command::Export { sheet_path, folder } => {
            commands::export::execute(&sheet_path, folder.as_deref())
                .context("Export command failed")
        }
        Command::Read {
            mapping_path,
            product_ids,
        } => commands::read::execute(&mapping_path, &product_ids).context("Read command failed"),
        Command::Config(action) => {
            commands::config::execute(action).context("Config command failed")
        }
        Command::Help => commands::help::execute(),
    }
}

/// 機械可読出力が要求されているか
pub fn is_machine_output(args: &[String]) -> bool {
    args.iter().skip(1).any(|arg| arg == MACHINE_FLAG)
}

/// 引数列（先頭はプログラム名）をコマンドに変換する
pub fn parse_command(args: &[String]) -> Result<Command> {
    let rest: Vec<&str> = args
        .iter()
        .skip(1)
        .map(String::as_str)
        .filter(|arg| *arg != MACHINE_FLAG)
        .collect();

    let Some((command, params)) = rest.split_first() else {
        return Ok(Command::Help);
    };

    match *command {
        "export" => parse_export(params),
        "read" => {
            let (mapping_path, product_ids) = params
                .split_first()
                .context("Please specify a mapping CSV path for read command")?;
            Ok(Command::Read {
                mapping_path: mapping_path.to_string(),
                product_ids: product_ids.iter().map(|id| id.to_string()).collect(),
            })
        }
        "config" => parse_config(params),
        "help" | "--help" | "-h" => Ok(Command::Help),
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    }
}

fn parse_export(params: &[&str]) -> Result<Command> {
    let mut sheet_path = None;
    let mut folder = None;

    let mut iter = params.iter();
    while let Some(param) = iter.next() {
        match *param {
            "--folder" => {
                let dir = iter.next().context("--folder requires a directory path")?;
                folder = Some(PathBuf::from(*dir));
            }
            flag if flag.starts_with("--") => bail!("Unknown option for export: '{}'", flag),
            path if sheet_path.is_none() => sheet_path = Some(path.to_string()),
            extra => bail!("Unexpected argument for export: '{}'", extra),
        }
    }

    let sheet_path =
        sheet_path.context("Please specify a sheet CSV path for export command")?;
    Ok(Command::Export { sheet_path, folder })
}

fn parse_config(params: &[&str]) -> Result<Command> {
    let action = match params {
        [] => ConfigAction::Show,
        ["folder", dir] => ConfigAction::SetFolder(PathBuf::from(*dir)),
        ["timezone", "local"] => ConfigAction::SetTimezone(None),
        ["timezone", seconds] => {
            let offset = seconds.parse::<i32>().with_context(|| {
                format!(
                    "Invalid timezone offset '{}'. Use seconds east of UTC (e.g. 32400) or 'local'.",
                    seconds
                )
            })?;
            ConfigAction::SetTimezone(Some(offset))
        }
        _ => bail!("Usage: planmap config [folder <dir> | timezone <seconds|local>]"),
    };
    Ok(Command::Config(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("planmap")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_no_args_is_help() {
        assert_eq!(parse_command(&args(&[])).unwrap(), Command::Help);
    }

    #[test]
    fn test_export_with_folder() {
        let command =
            parse_command(&args(&["--machine", "export", "sheet.csv", "--folder", "/out"]))
                .unwrap();
        assert_eq!(
            command,
            Command::Export {
                sheet_path: "sheet.csv".to_string(),
                folder: Some(PathBuf::from("/out")),
            }
        );
    }

    #[test]
    fn test_export_requires_path() {
        assert!(parse_command(&args(&["export"])).is_err());
        assert!(parse_command(&args(&["export", "--folder"])).is_err());
        assert!(parse_command(&args(&["export", "a.csv", "b.csv"])).is_err());
    }

    #[test]
    fn test_read() {
        assert_eq!(
            parse_command(&args(&["read", "mapping.csv"])).unwrap(),
            Command::Read {
                mapping_path: "mapping.csv".to_string(),
                product_ids: vec![],
            }
        );
        assert_eq!(
            parse_command(&args(&["read", "mapping.csv", "P1", "P2"])).unwrap(),
            Command::Read {
                mapping_path: "mapping.csv".to_string(),
                product_ids: vec!["P1".to_string(), "P2".to_string()],
            }
        );
        assert!(parse_command(&args(&["read"])).is_err());
    }

    #[test]
    fn test_config_actions() {
        assert_eq!(
            parse_command(&args(&["config"])).unwrap(),
            Command::Config(ConfigAction::Show)
        );
        assert_eq!(
            parse_command(&args(&["config", "folder", "/out"])).unwrap(),
            Command::Config(ConfigAction::SetFolder(PathBuf::from("/out")))
        );
        assert_eq!(
            parse_command(&args(&["config", "timezone", "32400"])).unwrap(),
            Command::Config(ConfigAction::SetTimezone(Some(32400)))
        );
        assert_eq!(
            parse_command(&args(&["config", "timezone", "local"])).unwrap(),
            Command::Config(ConfigAction::SetTimezone(None))
        );
        assert!(parse_command(&args(&["config", "timezone", "JST"])).is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command(&args(&["upload"])).unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
    }

    #[test]
    fn test_machine_flag() {
        assert!(is_machine_output(&args(&["--machine", "config"])));
        assert!(!is_machine_output(&args(&["config"])));
    }
}
