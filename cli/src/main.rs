use clap::Parser;
use dotenv::dotenv;
use vacancy_stats::headhunter::HeadHunter;
use vacancy_stats::report::format_table;
use vacancy_stats::stats::{collect_language_stats, JobSource};
use vacancy_stats::superjob::SuperJob;

const LANGUAGES: [&str; 10] = [
    "JavaScript",
    "Python",
    "Java",
    "TypeScript",
    "C#",
    "PHP",
    "C++",
    "Shell",
    "C",
    "Ruby",
];

/// Compare programmer vacancy counts and salaries on HeadHunter and SuperJob.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() -> vacancy_stats::Result<()> {
    dotenv().ok();
    env_logger::init();
    let _ = Cli::parse();
    let sj_api_key = std::env::var("SJ_SECRET_KEY").expect("SJ_SECRET_KEY not set");

    let headhunter = HeadHunter::new();
    println!("Collecting vacancies from HeadHunter...");
    log::info!("collecting {} languages from {}", LANGUAGES.len(), headhunter.title());
    let hh_stats = collect_language_stats(&headhunter, &LANGUAGES).await?;
    println!("Done!");

    let superjob = SuperJob::new(sj_api_key);
    println!("Collecting vacancies from SuperJob...");
    log::info!("collecting {} languages from {}", LANGUAGES.len(), superjob.title());
    let sj_stats = collect_language_stats(&superjob, &LANGUAGES).await?;
    println!("Done!");

    println!("{}", format_table(&hh_stats, headhunter.title()));
    println!("{}", format_table(&sj_stats, superjob.title()));
    Ok(())
}
