use std::time::Duration;

use crate::{logger, reasoning::ReasoningConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct CommandLineConfig {
    pub graph: Option<String>,
    pub log_level: String,
    pub reasoning: ReasoningConfig,
    pub command: String,
    pub command_args: Vec<String>,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut graph = None;
        let mut log_level = String::from("warn");
        let mut reasoning = ReasoningConfig::default();
        let mut command = String::from("status");
        let mut command_args = Vec::new();
        let mut command_set = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if command_set {
                command_args.push(arg.to_string());
                continue;
            }
            match *arg {
                "--graph" => graph = Some(flag_value(&mut iter, "--graph")?.to_string()),
                "--log-level" => {
                    let level = flag_value(&mut iter, "--log-level")?;
                    logger::parse_level(level).map_err(|e| e.to_string())?;
                    log_level = level.to_string();
                }
                "--max-path-len" => {
                    reasoning.limits.max_path_len =
                        parse_positive("--max-path-len", flag_value(&mut iter, "--max-path-len")?)?;
                }
                "--max-paths" => {
                    reasoning.max_paths =
                        parse_positive("--max-paths", flag_value(&mut iter, "--max-paths")?)?;
                }
                "--max-visits" => {
                    reasoning.limits.max_visits = Some(parse_positive(
                        "--max-visits",
                        flag_value(&mut iter, "--max-visits")?,
                    )?);
                }
                "--deadline-ms" => {
                    let millis =
                        parse_positive("--deadline-ms", flag_value(&mut iter, "--deadline-ms")?)?;
                    reasoning.limits.deadline = Some(Duration::from_millis(millis as u64));
                }
                "--sequential" => reasoning.parallel = false,
                "--command" => {
                    command = flag_value(&mut iter, "--command")?.to_string();
                    command_set = true;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    command = arg.to_string();
                    command_set = true;
                }
            }
        }
        Ok(Self {
            graph,
            log_level,
            reasoning,
            command,
            command_args,
        })
    }

    pub fn help() -> &'static str {
        "Usage: conceptpath --graph PATH [--max-path-len N] [--max-paths K] [--max-visits N]\n\
         \x20                  [--deadline-ms MS] [--sequential] [--log-level LEVEL] COMMAND [ARGS]\n\
         Commands:\n\
         \x20 status                       node and edge counts\n\
         \x20 check                        graph consistency audit\n\
         \x20 path START END               shortest path between two concepts\n\
         \x20 explain PREMISE CHOICE       ranked paths connecting the terms of two texts\n\
         \x20 examples FILE                ranked paths for every question block in FILE\n\
         \x20 import ASSERTIONS OUT        build a graph snapshot from ConceptNet rows\n"
    }
}

fn flag_value<'a, 'b: 'a, I>(iter: &mut I, flag: &str) -> Result<&'b str, String>
where
    I: Iterator<Item = &'a &'b str>,
{
    iter.next()
        .copied()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_positive(flag: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("{flag} expects a positive integer, got '{value}'")),
        Ok(parsed) => Ok(parsed),
    }
}
