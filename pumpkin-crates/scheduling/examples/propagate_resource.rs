//! Posts a single resource constraint on a handful of tasks and prints the windows of the tasks
//! after propagation.
//!
//! Tasks are given as `start_min,start_max,duration,demand`, e.g.
//! `cargo run --example propagate_resource --features clap -- cumulative --capacity 2 --task 0,1,4,2 --task 0,17,3,1`.
use std::io::Write;

use clap::Parser;
use clap::ValueEnum;
use convert_case::Case;
use log::info;
use log::LevelFilter;
use pumpkin_scheduling::constraints;
use pumpkin_scheduling::constraints::Constraint;
use pumpkin_scheduling::engine::PropagationEngine;
use pumpkin_scheduling::intervals::IntervalBounds;
use pumpkin_scheduling::intervals::ReadIntervals;
use pumpkin_scheduling::propagators::ArgTask;
use pumpkin_scheduling::propagators::CumulativeEdgeFindingTree;
use pumpkin_scheduling::propagators::CumulativeOptions;
use pumpkin_scheduling::statistics::configure_statistic_logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Resource {
    Disjunctive,
    DisjunctiveStrict,
    Cumulative,
}

/// A task as given on the command line.
#[derive(Debug, Clone, Copy)]
struct TaskArg {
    start_min: i64,
    start_max: i64,
    duration: i64,
    demand: i64,
}

fn parse_task(argument: &str) -> Result<TaskArg, String> {
    let values = argument
        .split(',')
        .map(|value| value.trim().parse::<i64>().map_err(|error| error.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    match values[..] {
        [start_min, start_max, duration, demand] => Ok(TaskArg {
            start_min,
            start_max,
            duration,
            demand,
        }),
        [start_min, start_max, duration] => Ok(TaskArg {
            start_min,
            start_max,
            duration,
            demand: 1,
        }),
        _ => Err(format!(
            "expected `start_min,start_max,duration[,demand]` but got `{argument}`"
        )),
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The resource constraint which is posted on the tasks.
    #[arg(value_enum)]
    resource: Resource,

    /// The tasks, as `start_min,start_max,duration[,demand]`; a small example instance is used
    /// when none are given.
    #[arg(short = 't', long = "task", value_parser = parse_task)]
    tasks: Vec<TaskArg>,

    /// The capacity of a cumulative resource.
    #[arg(short = 'c', long, default_value_t = 2)]
    capacity: i64,

    /// The tree used by cumulative edge-finding.
    #[arg(long, value_enum, default_value_t = CumulativeEdgeFindingTree::Batch)]
    edge_finding_tree: CumulativeEdgeFindingTree,

    /// Do not propagate the tasks with a high demand as a disjunctive resource.
    #[arg(long)]
    no_high_demand_decomposition: bool,

    /// Print the statistics of the propagators.
    #[arg(short = 's', long)]
    statistics: bool,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn default_tasks(resource: Resource) -> Vec<TaskArg> {
    let tasks: &[(i64, i64, i64, i64)] = match resource {
        Resource::Disjunctive | Resource::DisjunctiveStrict => {
            &[(0, 10, 3, 1), (2, 10, 4, 1), (0, 5, 4, 1)]
        }
        Resource::Cumulative => &[(0, 1, 4, 2), (0, 17, 3, 1), (2, 12, 2, 1), (0, 6, 3, 1)],
    };

    tasks
        .iter()
        .map(|&(start_min, start_max, duration, demand)| TaskArg {
            start_min,
            start_max,
            duration,
            demand,
        })
        .collect()
}

fn main() {
    let args = Args::parse();

    let level_filter = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "% {}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");

    if args.statistics {
        configure_statistic_logging("%%%mzn-stat:", Some("%%%mzn-stat-end"), Some(Case::Camel), None);
    }

    let task_args = if args.tasks.is_empty() {
        default_tasks(args.resource)
    } else {
        args.tasks.clone()
    };

    let mut engine = PropagationEngine::default();
    let mut tasks = Vec::with_capacity(task_args.len());
    for (index, task) in task_args.iter().enumerate() {
        match engine.new_interval(IntervalBounds::fixed_duration(
            task.start_min,
            task.start_max,
            task.duration,
        )) {
            Ok(interval) => tasks.push(ArgTask {
                interval,
                demand: task.demand,
            }),
            Err(error) => {
                println!("Task {index} has no feasible start: {error}");
                std::process::exit(1);
            }
        }
    }

    let result = match args.resource {
        Resource::Disjunctive => constraints::disjunctive(tasks.clone()).post(&mut engine),
        Resource::DisjunctiveStrict => {
            constraints::disjunctive_strict(tasks.clone()).post(&mut engine)
        }
        Resource::Cumulative => constraints::cumulative_with_options(
            tasks.clone(),
            args.capacity,
            CumulativeOptions {
                edge_finding_tree: args.edge_finding_tree,
                decompose_high_demand_tasks: !args.no_high_demand_decomposition,
            },
        )
        .post(&mut engine),
    };

    match result {
        Ok(()) => {
            println!("task  start window  end window  demand");
            for (index, task) in tasks.iter().enumerate() {
                let intervals = engine.intervals();
                println!(
                    "{index:>4}  [{:>4}, {:>4}]  [{:>4}, {:>4}]  {:>6}",
                    intervals.start_min(task.interval),
                    intervals.start_max(task.interval),
                    intervals.end_min(task.interval),
                    intervals.end_max(task.interval),
                    task.demand,
                );
            }
        }
        Err(inconsistency) => println!("The tasks do not fit on the resource: {inconsistency}"),
    }

    engine.log_statistics();
}
