use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use volunteer_hub::config::{DataConfig, MatchingConfig};
use volunteer_hub::error::AppError;
use volunteer_hub::storage::{
    InMemoryEventRepository, InMemoryIdeaRepository, InMemoryMemberRepository,
    InMemoryTaskRepository,
};
use volunteer_hub::workflows::dashboard::DashboardService;
use volunteer_hub::workflows::events::{AttendanceRecord, Event, EventService};
use volunteer_hub::workflows::ideas::{Idea, IdeaService};
use volunteer_hub::workflows::import::{ImportError, RosterImporter, TaskImporter};
use volunteer_hub::workflows::matching::{MatchConfig, MatchEngine, MatchWeights, RelevanceTable};
use volunteer_hub::workflows::roster::{Member, RosterService};
use volunteer_hub::workflows::tasks::{Task, TaskPriority, TaskService};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Members = InMemoryMemberRepository;
pub(crate) type Tasks = InMemoryTaskRepository;
pub(crate) type Events = InMemoryEventRepository;
pub(crate) type Ideas = InMemoryIdeaRepository;

/// The process-wide stores every service shares.
#[derive(Clone)]
pub(crate) struct Stores {
    pub(crate) members: Arc<Members>,
    pub(crate) tasks: Arc<Tasks>,
    pub(crate) events: Arc<Events>,
    pub(crate) ideas: Arc<Ideas>,
}

impl Stores {
    pub(crate) fn from_records(
        members: Vec<Member>,
        tasks: Vec<Task>,
        events: Vec<Event>,
        attendance: Vec<AttendanceRecord>,
        ideas: Vec<Idea>,
    ) -> Self {
        Self {
            members: Arc::new(InMemoryMemberRepository::with_members(members)),
            tasks: Arc::new(InMemoryTaskRepository::with_tasks(tasks)),
            events: Arc::new(InMemoryEventRepository::with_events(events, attendance)),
            ideas: Arc::new(InMemoryIdeaRepository::with_ideas(ideas)),
        }
    }

    /// Hydrate members and tasks from the configured exports. Missing paths start empty.
    pub(crate) fn load(data: &DataConfig) -> Result<Self, AppError> {
        let members = match &data.roster_csv {
            Some(path) => RosterImporter::from_path(path)?,
            None => Vec::new(),
        };
        let tasks = match &data.tasks_csv {
            Some(path) => TaskImporter::from_path(path)?,
            None => Vec::new(),
        };

        info!(
            members = members.len(),
            tasks = tasks.len(),
            "stores hydrated from exports"
        );
        Ok(Self::from_records(
            members,
            tasks,
            Vec::new(),
            Vec::new(),
            Vec::new(),
        ))
    }
}

pub(crate) struct Services {
    pub(crate) roster: Arc<RosterService<Members>>,
    pub(crate) tasks: Arc<TaskService<Members, Tasks>>,
    pub(crate) events: Arc<EventService<Members, Events>>,
    pub(crate) ideas: Arc<IdeaService<Members, Ideas>>,
    pub(crate) dashboard: Arc<DashboardService<Members, Tasks, Events, Ideas>>,
}

impl Services {
    pub(crate) fn new(stores: &Stores, engine: MatchEngine) -> Self {
        Self {
            roster: Arc::new(RosterService::new(stores.members.clone())),
            tasks: Arc::new(TaskService::new(
                stores.members.clone(),
                stores.tasks.clone(),
                engine,
            )),
            events: Arc::new(EventService::new(
                stores.members.clone(),
                stores.events.clone(),
            )),
            ideas: Arc::new(IdeaService::new(
                stores.members.clone(),
                stores.ideas.clone(),
            )),
            dashboard: Arc::new(DashboardService::new(
                stores.members.clone(),
                stores.tasks.clone(),
                stores.events.clone(),
                stores.ideas.clone(),
            )),
        }
    }
}

pub(crate) fn load_match_config(config: &MatchingConfig) -> Result<MatchConfig, AppError> {
    let relevance = match &config.relevance_csv {
        Some(path) => RelevanceTable::from_path(path).map_err(ImportError::from)?,
        None => RelevanceTable::standard(),
    };
    let weights = MatchWeights {
        workload_cap: config.workload_cap,
        ..MatchWeights::default()
    };

    Ok(MatchConfig { weights, relevance })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_priority(raw: &str) -> Result<TaskPriority, String> {
    TaskPriority::parse(raw).ok_or_else(|| format!("'{raw}' is not one of low, medium, high"))
}
