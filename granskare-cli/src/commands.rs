use clap::Parser;
use std::path::PathBuf;

use granskare_config::{OutputDataset, Overrides};

/// Passive network-audit pipeline orchestrator.
///
/// Takes either a raw packet capture or a directory of already-produced
/// tool logs, derives the instance identity, and dispatches the selected
/// parsers over it.
#[derive(Parser, Debug, Clone)]
#[command(name = "granskare", version, about)]
pub struct Cli {
    /// Enable verbose diagnostics
    #[arg(long)]
    pub debug: bool,

    /// Configuration file (defaults to config/granskare.yaml)
    #[arg(long = "conf", value_name = "FILE")]
    pub conf: Option<PathBuf>,

    /// Comma-separated parser list, e.g. bro,snortIds
    #[arg(long = "parser", value_name = "p1[,p2,...]")]
    pub parser: Option<String>,

    /// Dataset family for the downstream generators
    #[arg(long = "out_dataset", value_name = "all|audit")]
    pub out_dataset: Option<OutputDataset>,

    /// Home network CIDR list, e.g. 192.168.0.0/16,10.0.0.0/8
    #[arg(long = "home_net", value_name = "cidr[,cidr...]")]
    pub home_net: Option<String>,

    /// Decode payloads during processing
    #[arg(long)]
    pub payload: bool,

    /// Packet capture file to register and process
    #[arg(long = "cap_file", value_name = "PATH")]
    pub cap_file: Option<PathBuf>,

    /// Vulnerability dictionary for the audit generators
    #[arg(long = "audit_dict", value_name = "PATH")]
    pub audit_dict: Option<PathBuf>,

    /// Directory of already-produced tool logs
    #[arg(long = "instance_dir", value_name = "PATH")]
    pub instance_dir: Option<PathBuf>,

    /// Explicit output/log directory (selects the flat layout)
    #[arg(long = "log_dir", value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Primary diagnostic log file
    #[arg(long = "log_file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The highest-precedence configuration layer.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cap_file: self.cap_file.clone(),
            instance_dir: self.instance_dir.clone(),
            log_dir: self.log_dir.clone(),
            log_file: self.log_file.clone(),
            parsers: self.parser.clone(),
            home_net: self.home_net.clone(),
            payload: self.payload,
            debug: self.debug,
            out_dataset: self.out_dataset,
            audit_dict: self.audit_dict.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn documented_flags_parse() {
        let cli = Cli::parse_from([
            "granskare",
            "--debug",
            "--cap_file",
            "traffic.pcap",
            "--parser",
            "bro,snortIds",
            "--out_dataset",
            "audit",
            "--home_net",
            "192.168.0.0/16",
            "--log_dir",
            "/srv/out",
        ]);

        assert!(cli.debug);
        assert_eq!(cli.cap_file, Some(PathBuf::from("traffic.pcap")));
        assert_eq!(cli.parser.as_deref(), Some("bro,snortIds"));
        assert_eq!(cli.out_dataset, Some(OutputDataset::Audit));
        assert_eq!(cli.log_dir, Some(PathBuf::from("/srv/out")));
    }
}
