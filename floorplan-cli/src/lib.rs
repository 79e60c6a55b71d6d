//! # Floorplan CLI
//!
//! Command-line host for the floor plan designer.
//!
//! Loads a template, replays taps through the tool controller, selects
//! catalog devices, then prints a quote or exports the rendered plan.
//!
//! ## Usage
//!
//! ```bash
//! floorplan --template 一室一厅 --tap room:60,60 --tap wall:200,280 \
//!     --device 1:2 --device 7 --quote --output plan.svg
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Validated session configuration
//! - `Session` - Owns the store and renderer and applies the configuration

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod args;
mod session;

pub use args::{DeviceArg, TapArg};
pub use session::Session;

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for floorplan.
#[derive(Debug, Clone, Parser)]
#[command(name = "floorplan")]
#[command(about = "Smart-home floor plan designer")]
#[command(version)]
pub struct CliArgs {
    /// Built-in template to start from, by name or id (e.g. 一室一厅 or 1)
    #[arg(long, env = "FLOORPLAN_TEMPLATE", conflicts_with = "template_file")]
    pub template: Option<String>,

    /// Solution package whose template to start from
    #[arg(long, conflicts_with_all = ["template", "template_file"])]
    pub solution: Option<u32>,

    /// Template JSON file to start from
    #[arg(long)]
    pub template_file: Option<PathBuf>,

    /// Tap to replay, as TOOL:X,Y (repeatable)
    #[arg(long = "tap", value_name = "TOOL:X,Y")]
    pub taps: Vec<TapArg>,

    /// Catalog device to select, as ID[:QTY] (repeatable)
    #[arg(long = "device", value_name = "ID[:QTY]")]
    pub devices: Vec<DeviceArg>,

    /// Write the rendered plan as SVG to this path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the last rendered frame as draw-command JSON
    #[arg(long)]
    pub commands: bool,

    /// Print the price breakdown
    #[arg(long)]
    pub quote: bool,

    /// File the quote as a new order and print it
    #[arg(long)]
    pub submit: bool,
}

/// Where the initial layout comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// Start from an empty canvas.
    #[default]
    Empty,
    /// A built-in template by name or numeric id.
    Builtin(String),
    /// The template of a catalog solution package.
    Solution(u32),
    /// A template JSON file.
    File(PathBuf),
}

/// Session configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Initial layout.
    pub template: TemplateSource,
    /// Taps replayed in order.
    pub taps: Vec<TapArg>,
    /// Devices selected in order.
    pub devices: Vec<DeviceArg>,
    /// SVG output path.
    pub output: Option<PathBuf>,
    /// Print draw commands.
    pub print_commands: bool,
    /// Print the quote.
    pub print_quote: bool,
    /// Submit the quote as an order.
    pub submit_order: bool,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let template = match (args.template, args.template_file, args.solution) {
            (_, Some(path), _) => TemplateSource::File(path),
            (_, None, Some(id)) => TemplateSource::Solution(id),
            (Some(name), None, None) => TemplateSource::Builtin(name),
            (None, None, None) => TemplateSource::Empty,
        };
        Self {
            template,
            taps: args.taps,
            devices: args.devices,
            output: args.output,
            print_commands: args.commands,
            print_quote: args.quote,
            submit_order: args.submit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::Tool;

    #[test]
    fn test_args_into_config() {
        let args = CliArgs::try_parse_from([
            "floorplan",
            "--template",
            "两室一厅",
            "--tap",
            "wall:10,10",
            "--tap",
            "room:60,60",
            "--device",
            "3:2",
            "--quote",
        ])
        .expect("args");
        let config = CliConfig::from(args);

        assert_eq!(
            config.template,
            TemplateSource::Builtin("两室一厅".to_string())
        );
        assert_eq!(config.taps.len(), 2);
        assert_eq!(config.taps[0].tool, Tool::Wall);
        assert_eq!(config.devices[0], DeviceArg { id: 3, quantity: 2 });
        assert!(config.print_quote);
        assert!(!config.print_commands);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_template_and_file_conflict() {
        let result = CliArgs::try_parse_from([
            "floorplan",
            "--template",
            "一室一厅",
            "--template-file",
            "plan.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_solution_flag() {
        let args = CliArgs::try_parse_from(["floorplan", "--solution", "2"]).expect("args");
        assert_eq!(CliConfig::from(args).template, TemplateSource::Solution(2));

        let result =
            CliArgs::try_parse_from(["floorplan", "--solution", "2", "--template", "一室一厅"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_tap_rejected() {
        assert!(CliArgs::try_parse_from(["floorplan", "--tap", "eraser:1,2"]).is_err());
        assert!(CliArgs::try_parse_from(["floorplan", "--tap", "room:1"]).is_err());
    }
}
