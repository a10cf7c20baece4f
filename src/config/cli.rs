use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DumpTarget {
    All,
    Planets,
    Scientists,
    Missions,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mission-registry")]
#[command(about = "Seed a planet/scientist/mission registry and print it as JSON")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to the TOML registry configuration")]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value = "all")]
    pub dump: DumpTarget,

    #[arg(long, help = "Emit JSON logs regardless of the config file")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
