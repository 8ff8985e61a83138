use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobmatch::{
    extract_contact_info, extract_resume_text, extract_skills, AdzunaSource, ExtractOptions,
    JobQuery, JobSource, LlmJobSource, Matcher, MatcherConfig, MiniLmEmbedder, SampleSource,
    SkillVocabulary, Weights,
};

const SKILLS_FILE: &str = "skills.json";

#[tokio::main]
async fn main() -> Result<()> {
    let config = MatcherConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let resume_path = args
        .next()
        .context("usage: jobmatch <resume-file> [query] [location]")?;
    let query = args.next().unwrap_or_else(|| "Software Engineer".to_string());
    let location = args.next().unwrap_or_else(|| "India".to_string());

    // Resume intake
    let bytes = std::fs::read(&resume_path)
        .with_context(|| format!("cannot read resume file '{resume_path}'"))?;
    let resume_text = extract_resume_text(&resume_path, &bytes)?;
    let contact = extract_contact_info(&resume_text);
    info!(
        "Parsed resume for '{}' ({} emails, {} phones)",
        contact.name_guess,
        contact.emails.len(),
        contact.phones.len()
    );

    // Skill extraction
    let vocabulary = if Path::new(SKILLS_FILE).exists() {
        SkillVocabulary::from_path(SKILLS_FILE)?
    } else {
        SkillVocabulary::builtin()
    };
    let options = ExtractOptions {
        fuzzy_threshold: config.fuzzy_threshold,
        min_exact_matches: config.min_exact_matches,
    };
    let resume_skills = extract_skills(&resume_text, &vocabulary, &options);
    info!("Detected skills: {}", resume_skills.join(", "));

    // Job source: Adzuna when credentials are set, then the LLM source,
    // otherwise the built-in sample set.
    let source: Box<dyn JobSource> = match AdzunaSource::from_env() {
        Ok(s) => {
            info!("Using Adzuna job source");
            Box::new(s)
        }
        Err(_) => match LlmJobSource::from_env() {
            Ok(s) => {
                info!("Using LLM job source");
                Box::new(s)
            }
            Err(_) => {
                info!("No source credentials found; using built-in sample jobs");
                Box::new(SampleSource::builtin())
            }
        },
    };

    let jobs = source
        .fetch(&JobQuery {
            query,
            location,
            results_per_page: 50,
            page: 1,
        })
        .await?;
    info!("Fetched {} postings", jobs.len());

    // Score and rank
    let matcher = Matcher::with_weights(
        Arc::new(MiniLmEmbedder::new()),
        Weights {
            w_skill: config.w_skill,
            w_sem: config.w_sem,
        },
    );
    let ranked = matcher.rank(&resume_text, &resume_skills, &jobs, config.top_n)?;

    println!("\nTop {} recommendations:\n", ranked.len());
    println!("{:>7}  {:>7}  {:>7}  Title — Company (Location)", "final", "skill", "sem");
    for entry in &ranked {
        println!(
            "{:>7.1}  {:>7.1}  {:>7.1}  {} — {} ({})",
            entry.score.final_score,
            entry.score.skill_overlap_pct,
            entry.score.semantic_similarity_pct,
            entry.job.title,
            entry.job.company,
            entry.job.location
        );
        if !entry.score.matched_skills.is_empty() {
            println!("         matched: {}", entry.score.matched_skills.join(", "));
        }
        if !entry.score.missing_skills.is_empty() {
            println!("         missing: {}", entry.score.missing_skills.join(", "));
        }
        if !entry.job.url.is_empty() {
            println!("         {}", entry.job.url);
        }
    }

    Ok(())
}
