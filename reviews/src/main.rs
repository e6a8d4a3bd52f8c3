//! Command line front end for the review dataset
//!
//! Runs the same pipeline as the dashboard once and prints the result.

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use reviews::{
    DashboardQuery, DashboardView, DatasetSource, NewReview, RealDatasetSource, RealSubmissionLog, RegionFilter, ReviewFilter,
    ReviewStore, SortDirection, SubmissionLog, merge_submissions, region_options, run_pipeline, store_analytics,
};
use shared::config::{DEFAULT_DATASET_PATH, DEFAULT_SUBMISSIONS_PATH, load_env_file};
use shared::{DataPaths, ProcessId, logging, process_warn};

#[derive(Parser, Debug)]
#[command(name = "reviews")]
#[command(about = "Browse restaurant reviews and submit new ones")]
struct Args {
    /// Base review dataset (ISO-8859-1 CSV)
    #[arg(long, env = "MCREVIEWS_DATASET", default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Submission log (UTF-8 CSV, created on first submission)
    #[arg(long, env = "MCREVIEWS_SUBMISSIONS", default_value = DEFAULT_SUBMISSIONS_PATH)]
    submissions: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MCREVIEWS_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filtered, sorted review table with its rating summary
    View(ViewArgs),
    /// Region selector options
    Regions,
    /// Rating analytics over every review
    Analytics,
    /// Append a review to the submission log
    Submit(SubmitArgs),
}

#[derive(ClapArgs, Debug)]
struct ViewArgs {
    /// Inclusive minimum rating
    #[arg(long, default_value_t = reviews::DEFAULT_MIN_RATING)]
    min_rating: f64,

    /// Two-letter region code, or "All"
    #[arg(long, default_value = "All")]
    region: RegionFilter,

    /// Case-insensitive address search
    #[arg(long)]
    search: Option<String>,

    /// Rating order within each region (asc or desc)
    #[arg(long, default_value = "desc")]
    sort: SortDirection,

    /// Maximum rows to print
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(ClapArgs, Debug)]
struct SubmitArgs {
    #[arg(long, default_value = "")]
    address: String,

    /// 1.0 to 5.0 in steps of 0.5
    #[arg(long)]
    rating: f64,

    #[arg(long)]
    review: Option<String>,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    latitude: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    longitude: f64,
}

fn main() -> anyhow::Result<()> {
    load_env_file()?;
    let args = Args::parse();

    ProcessId::init_cli();
    logging::init_tracing(Some(&args.log_level));

    let paths = DataPaths {
        dataset: args.dataset.clone(),
        submissions: args.submissions.clone(),
    };
    let log = RealSubmissionLog::new(&paths.submissions);

    match args.command {
        Command::Submit(submit) => {
            let review = NewReview {
                store_address: submit.address,
                rating: submit.rating,
                review: submit.review,
                latitude: submit.latitude,
                longitude: submit.longitude,
            };
            review.validate()?;
            let record = log
                .append(review)
                .with_context(|| format!("writing {}", paths.submissions.display()))?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!(
                    "Review submitted for {} (region {})",
                    record.store_address().unwrap_or("<no address>"),
                    record.region().unwrap_or("-")
                );
            }
        }
        Command::Regions => {
            let store = open_store(&paths, &log)?;
            let options = region_options(&store);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                println!("{}", options.join(" "));
            }
        }
        Command::Analytics => {
            let store = open_store(&paths, &log)?;
            let report = store_analytics(&store);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                match report.summary.mean {
                    Some(mean) => println!("Average rating: {mean:.2} over {} reviews", report.summary.count),
                    None => println!("Average rating: no data"),
                }
                println!("\nAverage rating by state:");
                for avg in &report.region_averages {
                    println!("  {:<4} {:.2} ({})", avg.region, avg.mean_rating, avg.count);
                }
                println!("\nRating distribution:");
                for bucket in &report.rating_histogram {
                    println!("  {:<4} {}", bucket.rating, bucket.count);
                }
            }
        }
        Command::View(view_args) => {
            let store = open_store(&paths, &log)?;
            let mut filter = ReviewFilter::default()
                .with_min_rating(view_args.min_rating)
                .with_region(view_args.region);
            if let Some(search) = view_args.search {
                filter = filter.with_address_query(search);
            }
            let query = DashboardQuery {
                filter,
                sort: view_args.sort,
            };
            let view = run_pipeline(&store, &query);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view, view_args.limit);
            }
        }
    }

    Ok(())
}

/// Load the base set (fatal on failure) and merge the log (warn on failure)
fn open_store(paths: &DataPaths, log: &RealSubmissionLog) -> anyhow::Result<ReviewStore> {
    let dataset = RealDatasetSource::new(&paths.dataset);
    let base = dataset
        .load_base()
        .with_context(|| format!("loading {}", dataset.describe()))?;
    let mut store = ReviewStore::new(base);

    if let Err(e) = merge_submissions(&mut store, log) {
        process_warn!(ProcessId::current(), "⚠️ Ignoring submission log: {}", e);
    }

    Ok(store)
}

fn print_view(view: &DashboardView, limit: usize) {
    if view.empty {
        println!("No matching stores found.");
        return;
    }

    for record in view.records.iter().take(limit) {
        let rating = record.rating().map(|r| format!("{r:.1}")).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<3} {:>4}  {}  | {}",
            record.region().unwrap_or("-"),
            rating,
            record.store_address().unwrap_or("<no address>"),
            record.review()
        );
    }
    if view.records.len() > limit {
        println!("... {} more", view.records.len() - limit);
    }

    if let Some(mean) = view.summary.mean {
        println!("\n{} reviews, average {:.2}", view.summary.count, mean);
    }
    if let Some(map) = &view.map {
        println!("Map centre: {:.4}, {:.4}", map.center_latitude, map.center_longitude);
    }
}
