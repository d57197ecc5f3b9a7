// ============================================================================
// src/cli/mod.rs - Command-line front end over DashboardSession
// ============================================================================

mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use portfolio_dashboard::{
    DashboardConfig, DashboardSession, DatePreset, Department, ExportFormat, FilterSpec,
    ProjectStatus, Region, SortColumn, SortKey,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portfolio-dashboard")]
#[command(about = "Deterministic portfolio analytics over seeded demo projects")]
pub struct Cli {
    /// Number of generated projects (overrides PORTFOLIO_PROJECT_COUNT)
    #[arg(long, global = true)]
    count: Option<usize>,

    /// Generator seed (overrides PORTFOLIO_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Skip the simulated load latency
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Default)]
struct FilterArgs {
    /// Keep only this department (repeatable)
    #[arg(long = "department", global = true)]
    departments: Vec<Department>,

    /// Keep only this region (repeatable)
    #[arg(long = "region", global = true)]
    regions: Vec<Region>,

    /// Keep only this status (repeatable)
    #[arg(long = "status", global = true)]
    statuses: Vec<ProjectStatus>,

    /// Start-date window: 30d, 90d, ytd or all
    #[arg(long = "date", global = true)]
    date_preset: Option<DatePreset>,

    /// Case-insensitive text search over name, id, owner, department and region
    #[arg(long, global = true)]
    search: Option<String>,

    #[arg(long, global = true, allow_negative_numbers = true)]
    max_risk: Option<i32>,

    #[arg(long, global = true, allow_negative_numbers = true)]
    min_reward: Option<i32>,
}

impl FilterArgs {
    fn to_spec(&self) -> FilterSpec {
        let defaults = FilterSpec::default();
        FilterSpec::new()
            .with_departments(self.departments.iter().copied())
            .with_regions(self.regions.iter().copied())
            .with_statuses(self.statuses.iter().copied())
            .with_date_preset(self.date_preset.unwrap_or_default())
            .with_search(self.search.clone().unwrap_or_default())
            .with_max_risk(self.max_risk.unwrap_or(defaults.max_risk))
            .with_min_reward(self.min_reward.unwrap_or(defaults.min_reward))
    }
}

#[derive(Subcommand)]
enum Command {
    /// KPI cards, insights, critical projects and top performers
    Summary,
    /// The sortable, paged project table
    Projects {
        #[arg(long)]
        sort: Option<SortColumn>,
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Recent activity feed
    Activity,
    /// Insight cards only
    Insights,
    /// Chart breakdowns over the filtered set
    Breakdown,
    /// Per-department totals over every project
    Departments,
    /// Details for a single project
    Show { id: String },
    /// Export the filtered projects
    Export {
        format: ExportFormat,
        /// Destination file; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export one project as JSON into a directory
    ExportProject {
        id: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

impl Cli {
    fn config(&self) -> Result<DashboardConfig> {
        let mut config = DashboardConfig::from_env().context("Failed to read configuration")?;
        if let Some(count) = self.count {
            config = config.project_count(count);
        }
        if let Some(seed) = self.seed {
            config = config.seed(seed);
        }
        if self.no_delay {
            config = config.without_load_delay();
        }
        config.validate()?;
        Ok(config)
    }

    pub async fn run(self) -> Result<()> {
        let mut session = DashboardSession::new(self.config()?)?;
        session.load().await.context("Failed to load projects")?;
        session.set_filters(self.filters.to_spec());

        match self.command {
            Command::Summary => {
                render::print_filters(session.filters());
                render::print_kpis(session.kpis()?);
                println!();
                render::print_insights(session.insights()?, &session.insight_rules());
                println!("\nCritical projects");
                render::print_projects(session.critical_projects()?);
                println!("\nTop performers");
                render::print_projects(session.top_performers()?);
            }
            Command::Projects { sort, desc, page } => {
                let key = sort.map(|column| if desc { SortKey::desc(column) } else { SortKey::asc(column) });
                session.set_sort(key);
                let page = session.set_page(page);
                render::print_filters(session.filters());
                render::print_projects(&session.current_page()?);
                println!(
                    "page {} of {} ({} projects)",
                    page,
                    session.total_pages(),
                    session.filtered_projects()?.len()
                );
            }
            Command::Activity => render::print_activities(session.activities()?),
            Command::Insights => {
                render::print_insights(session.insights()?, &session.insight_rules())
            }
            Command::Breakdown => render::print_breakdowns(session.breakdowns()?),
            Command::Departments => render::print_department_stats(&session.department_stats()?),
            Command::Show { id } => render::print_project_details(session.project(&id)?),
            Command::Export { format, out } => match out {
                Some(path) => {
                    let written = session
                        .export(format, Some(path.as_path()))
                        .with_context(|| format!("Failed to export to '{}'", path.display()))?;
                    println!("wrote {}", written.display());
                }
                None => println!("{}", session.render_export(format)?),
            },
            Command::ExportProject { id, dir } => {
                let written = session.export_project(&id, &dir)?;
                println!("wrote {}", written.display());
            }
        }

        Ok(())
    }
}
