use std::{env::var, io::stderr, path::PathBuf};

use aftershock::{
    attack::Strategy,
    centrality::Measure,
    config::Config,
    format,
    fracture::FractureOperator,
    report::Report,
};
use clap::{ArgAction, Parser};
use eyre::{Result as EyreResult, WrapErr};
use tracing::info;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{registry, EnvFilter};

/// Simulates targeted attacks on a network and reports how quickly it fragments.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = concat!(
    "Environment variables:\n",
    "  RUST_LOG    Log filter directives (default: aftershock=info)\n\n",
    "Examples:",
    "
  # Compare every strategy, ranking once on the intact network
  $ aftershock network.gml report.json false

  # Recompute rankings after each removal, and keep the network left after losing 20% of it
  $ aftershock network.gml report.json true --fracture 0.2 --fracture-output damaged.gml
"
))]
struct RootCommand {
    /// Network to attack, GML (.gml) or JSON (.json)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the JSON report
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Recompute rankings after every removal (true or false)
    #[arg(value_name = "RECALCULATE", action = ArgAction::Set, required = true)]
    recalculate: bool,

    /// TOML run configuration
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the random strategy, overrides the configuration
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Also fracture the network, removing at least this fraction of its nodes
    #[arg(long, value_name = "FRACTION")]
    fracture: Option<f64>,

    /// Measure used to fracture the network
    #[arg(long, value_name = "MEASURE", default_value_t = Measure::Betweenness)]
    fracture_measure: Measure,

    /// Where to write the fractured, component-labelled network
    #[arg(long, value_name = "PATH", requires = "fracture")]
    fracture_output: Option<PathBuf>,
}

impl RootCommand {
    fn run(self) -> EyreResult<()> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        let graph = format::load(&self.input)
            .wrap_err_with(|| format!("failed to load network {}", self.input.display()))?;
        info!(
            nodes = graph.vertex_count(),
            edges = graph.edge_count(),
            "network loaded"
        );

        let ranker = config.ranker();
        let report = Report::compare(
            &graph,
            &ranker,
            &config.measures,
            self.recalculate,
            config.budget,
        )?;
        report
            .write_json(&self.output)
            .wrap_err_with(|| format!("failed to write report {}", self.output.display()))?;

        print!("{report}");

        if let Some(fraction) = self.fracture {
            let fracture = FractureOperator::new(
                &ranker,
                Strategy::new(self.fracture_measure, self.recalculate),
            )
            .with_budget(config.budget)
            .apply(&graph, fraction)?;

            println!(
                "Fractured by {}: {} removed, {} survivors in {} components",
                self.fracture_measure,
                fracture.removed.len(),
                fracture.survivors(),
                fracture.components
            );

            if let Some(path) = &self.fracture_output {
                fracture
                    .persist(path)
                    .wrap_err_with(|| format!("failed to write network {}", path.display()))?;
            }
        }

        Ok(())
    }
}

fn main() -> EyreResult<()> {
    setup()?;

    let command = RootCommand::parse();

    command.run()
}

fn setup() -> EyreResult<()> {
    let directives = match var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => "aftershock=info".to_owned(),
    };

    registry()
        .with(EnvFilter::builder().parse(directives)?)
        .with(layer().with_writer(stderr))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{ffi::OsStr, fs};

    use aftershock::graph::Graph;
    use clap::{error::ErrorKind, CommandFactory};

    use super::*;

    #[test]
    fn verify_command() {
        RootCommand::command().debug_assert();
    }

    #[test]
    fn positional_arguments() {
        let command =
            RootCommand::try_parse_from(["aftershock", "network.gml", "report.json", "true"])
                .unwrap();

        assert_eq!(command.input, PathBuf::from("network.gml"));
        assert_eq!(command.output, PathBuf::from("report.json"));
        assert!(command.recalculate);
        assert_eq!(command.fracture_measure, Measure::Betweenness);
        assert_eq!(command.fracture, None);
    }

    #[test]
    fn wrong_argument_count() {
        for args in [
            vec!["aftershock"],
            vec!["aftershock", "network.gml"],
            vec!["aftershock", "network.gml", "report.json"],
        ] {
            let err = RootCommand::try_parse_from(args.clone()).unwrap_err();

            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument, "{args:?}");
            assert_ne!(err.exit_code(), 0);
        }

        let err = RootCommand::try_parse_from([
            "aftershock",
            "network.gml",
            "report.json",
            "false",
            "extra",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn invalid_values() {
        for args in [
            ["aftershock", "network.gml", "report.json", "maybe"].as_slice(),
            &["aftershock", "a.gml", "b.json", "true", "--fracture-measure", "pagerank"],
            &["aftershock", "a.gml", "b.json", "true", "--fracture-output", "c.gml"],
        ] {
            let err = RootCommand::try_parse_from(args).unwrap_err();
            assert_ne!(err.exit_code(), 0, "{args:?}");
        }
    }

    #[test]
    fn run_writes_report_and_fracture() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("network.gml");
        let output = dir.path().join("report.json");
        let damaged = dir.path().join("damaged.json");

        // Two triangles joined through node 4.
        let graph = Graph::from_edges([(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 6), (6, 7), (7, 5)]);
        format::persist(&graph, &input).unwrap();

        RootCommand::try_parse_from([
            OsStr::new("aftershock"),
            input.as_os_str(),
            output.as_os_str(),
            OsStr::new("false"),
            OsStr::new("--fracture"),
            OsStr::new("0.1"),
            OsStr::new("--fracture-output"),
            damaged.as_os_str(),
        ])
        .unwrap()
        .run()
        .unwrap();

        let report: Report =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(report.nodes, 7);
        assert_eq!(report.completed().count(), 5);

        let fractured = format::load(&damaged).unwrap();
        assert_eq!(fractured.vertex_count(), 6);
        assert!(!fractured.contains_node(4));
    }
}
