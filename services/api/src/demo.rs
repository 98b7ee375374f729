use crate::infra::{build_board, parse_date, BoardServices};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::io::Cursor;
use std::path::PathBuf;
use talentdesk::board::jobs::NewJobPosting;
use talentdesk::board::resumes::AtsResumeImporter;
use talentdesk::board::stats::{compute_rate_series, RatePeriod, RateSeriesPoint};
use talentdesk::board::users::{NewUserAccount, UserId, UserRole};
use talentdesk::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct StatsReportArgs {
    /// Window to report: week, month, or year (unknown values read as week)
    #[arg(long)]
    pub(crate) period: Option<String>,
    /// Reference day for the series (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// ATS résumé CSV export feeding the series instead of demo data
    #[arg(long)]
    pub(crate) resumes_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the demo's reference day (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Window used for the rate tables: week, month, or year
    #[arg(long)]
    pub(crate) period: Option<String>,
}

pub(crate) fn run_stats_report(args: StatsReportArgs) -> Result<(), AppError> {
    let StatsReportArgs {
        period,
        today,
        resumes_csv,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let period = RatePeriod::parse(period.as_deref().unwrap_or("week"));

    let (events, source): (Vec<NaiveDate>, &str) = match resumes_csv {
        Some(path) => {
            let rows = AtsResumeImporter::from_path(path, today)?;
            (rows.into_iter().map(|row| row.uploaded_on).collect(), "ATS export")
        }
        None => (demo_upload_dates(today), "bundled demo data"),
    };

    println!(
        "CV registration rate | {} window ending {} | source: {}",
        period.as_str(),
        today,
        source
    );
    render_rate_table(&compute_rate_series(events, period, today));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, period } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let period = RatePeriod::parse(period.as_deref().unwrap_or("week"));

    println!("Job board demo (evaluated {today})");

    let services = build_board();
    let seeded = match seed_board(&services, today) {
        Ok(seeded) => seeded,
        Err(err) => {
            println!("  Demo seed failed: {err}");
            return Ok(());
        }
    };

    match services.stats.admin_summary() {
        Ok(summary) => {
            println!("\nBoard overview");
            println!("- {} recruiters, {} candidates, {} admins", summary.recruiters_count, summary.candidates_count, summary.admins_count);
            println!("- {} resumes on file", summary.resumes_count);
            println!("- {} job offers, {} applications", summary.offers_count, summary.applications_count);
        }
        Err(err) => println!("  Board overview unavailable: {err}"),
    }

    match services.stats.recruiter_summary(&seeded.recruiter) {
        Ok(summary) => {
            println!("\nRecruiter snapshot");
            println!("- {} offers ({} open / {} closed)", summary.offers_count, summary.open_offers_count, summary.closed_offers_count);
            println!("- {} applications received", summary.applications_count);
            println!("- Most in demand: {}", summary.most_popular_job_title);
            println!("- Least in demand: {}", summary.least_popular_job_title);
        }
        Err(err) => println!("  Recruiter snapshot unavailable: {err}"),
    }

    match services.stats.candidate_summary(&seeded.candidate) {
        Ok(summary) => {
            println!("\nCandidate snapshot");
            println!(
                "- {} applications ({} pending / {} accepted / {} rejected)",
                summary.applications_count,
                summary.pending_applications_count,
                summary.accepted_applications_count,
                summary.rejected_applications_count
            );
            println!("- Mostly applying in: {}", summary.most_applied_job_category);
        }
        Err(err) => println!("  Candidate snapshot unavailable: {err}"),
    }

    match services.stats.registration_rate(period, today) {
        Ok(points) => {
            println!("\nCV registration rate ({} window)", period.as_str());
            render_rate_table(&points);
        }
        Err(err) => println!("  Registration rate unavailable: {err}"),
    }

    match services.stats.application_rate(period, today) {
        Ok(points) => {
            println!("\nApplication rate ({} window)", period.as_str());
            render_rate_table(&points);
        }
        Err(err) => println!("  Application rate unavailable: {err}"),
    }

    Ok(())
}

struct SeededBoard {
    recruiter: UserId,
    candidate: UserId,
}

/// Offsets (days before "today") at which the demo résumés were uploaded.
/// The bulge near the end keeps the weekly rate table interesting.
const UPLOAD_OFFSETS: [i64; 8] = [45, 20, 9, 6, 4, 1, 0, 0];

fn demo_upload_dates(today: NaiveDate) -> Vec<NaiveDate> {
    UPLOAD_OFFSETS
        .iter()
        .map(|offset| today - Duration::days(*offset))
        .collect()
}

fn seed_board(services: &BoardServices, today: NaiveDate) -> Result<SeededBoard, String> {
    let directory = &services.directory;

    directory
        .create(
            UserRole::Admin,
            NewUserAccount {
                email: "root@talentdesk.example".to_string(),
                name: "Site Admin".to_string(),
                company: None,
                position: None,
            },
            today - Duration::days(90),
        )
        .map_err(|err| err.to_string())?;

    let recruiter = directory
        .create(
            UserRole::Recruiter,
            NewUserAccount {
                email: "hind@atlasworks.example".to_string(),
                name: "Hind Tazi".to_string(),
                company: Some("Atlasworks".to_string()),
                position: Some("Talent Lead".to_string()),
            },
            today - Duration::days(60),
        )
        .map_err(|err| err.to_string())?
        .id;

    let mut candidates = Vec::new();
    for (n, (name, email, offset)) in [
        ("omar-haddad", "omar@example.com", 9i64),
        ("nadia-mansouri", "nadia@example.com", 4),
        ("karim-ziani", "karim@example.com", 1),
    ]
    .iter()
    .enumerate()
    {
        let account = directory
            .create(
                UserRole::Candidate,
                NewUserAccount {
                    email: (*email).to_string(),
                    name: name.replace('-', " "),
                    company: None,
                    position: None,
                },
                today - Duration::days(offset + 5),
            )
            .map_err(|err| err.to_string())?;

        services
            .resumes
            .upload_for_candidate(
                &account.id,
                &format!("{name}.pdf"),
                today - Duration::days(*offset),
            )
            .map_err(|err| err.to_string())?;

        if n == 0 {
            // Keep one candidate with a re-parsed, richer profile.
            services
                .resumes
                .update_fields(
                    &account.id,
                    talentdesk::board::resumes::ResumeFieldsUpdate {
                        education: Some("Master".to_string()),
                        skills: Some("Rust, SQL, Kubernetes".to_string()),
                        ..Default::default()
                    },
                    today,
                )
                .map_err(|err| err.to_string())?;
        }

        candidates.push(account.id);
    }

    // A handful of unassigned résumés arrive through the ATS importer.
    let import_csv = format!(
        "File Name,Name,Email,Skills,Uploaded On\n\
         cv-pool-001.pdf,Amina Benali,amina@example.com,\"Java, Spring\",{}\n\
         cv-pool-002.pdf,Yassine Kabbaj,yassine@example.com,\"React, Node\",{}\n\
         cv-pool-003.pdf,,,,\n",
        today - Duration::days(20),
        today - Duration::days(6),
    );
    services
        .resumes
        .import_records(Cursor::new(import_csv.into_bytes()), today)
        .map_err(|err| err.to_string())?;

    let backend = services
        .jobs
        .create(
            &recruiter,
            NewJobPosting {
                title: "Backend Engineer".to_string(),
                description: "Own the hiring pipeline services".to_string(),
                kind: Some("Full-time".to_string()),
                city: Some("Casablanca".to_string()),
                category: Some("Engineering".to_string()),
                company: Some("Atlasworks".to_string()),
                open: true,
                headcount: 2,
            },
            today - Duration::days(15),
        )
        .map_err(|err| err.to_string())?;

    let analyst = services
        .jobs
        .create(
            &recruiter,
            NewJobPosting {
                title: "Data Analyst".to_string(),
                description: "Turn hiring funnels into dashboards".to_string(),
                kind: Some("Full-time".to_string()),
                city: Some("Rabat".to_string()),
                category: Some("Data".to_string()),
                company: Some("Atlasworks".to_string()),
                open: true,
                headcount: 1,
            },
            today - Duration::days(12),
        )
        .map_err(|err| err.to_string())?;

    services
        .jobs
        .create(
            &recruiter,
            NewJobPosting {
                title: "Office Manager".to_string(),
                description: "Keep the Rabat office humming".to_string(),
                kind: Some("Full-time".to_string()),
                city: Some("Rabat".to_string()),
                category: Some("Operations".to_string()),
                company: Some("Atlasworks".to_string()),
                open: false,
                headcount: 1,
            },
            today - Duration::days(30),
        )
        .map_err(|err| err.to_string())?;

    let first = services
        .applications
        .apply(&candidates[0], &backend.id, today - Duration::days(3))
        .map_err(|err| err.to_string())?;
    services
        .applications
        .apply(&candidates[1], &backend.id, today - Duration::days(1))
        .map_err(|err| err.to_string())?;
    services
        .applications
        .apply(&candidates[0], &analyst.id, today)
        .map_err(|err| err.to_string())?;

    services
        .applications
        .update_status(&first.id, Some("AC"))
        .map_err(|err| err.to_string())?;

    Ok(SeededBoard {
        recruiter,
        candidate: candidates[0].clone(),
    })
}

fn render_rate_table(points: &[RateSeriesPoint]) {
    let active: Vec<&RateSeriesPoint> = points.iter().filter(|point| point.rate > 0.0).collect();
    if active.is_empty() {
        println!("  (no activity in this window)");
        return;
    }

    for point in points {
        if point.rate > 0.0 {
            println!("  {}  {:>6.2}%", point.date, point.rate);
        }
    }
    println!(
        "  {} of {} days saw new activity",
        active.len(),
        points.len()
    );
}
