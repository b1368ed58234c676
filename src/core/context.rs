use crate::config::Config;
use crate::core::cli::CliPaths;
use crate::errors::Result;
use crate::logging::Logger;
use crate::store::{ProfileStore, ScheduleStore, TaskStore};
use std::path::{Path, PathBuf};

pub const LOGS_DIR: &str = "logs";

/// Everything one invocation needs, built once from the resolved paths.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub logger: Logger,
    pub profiles: ProfileStore,
    pub schedules: ScheduleStore,
    pub tasks: TaskStore,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppContext {
    pub fn from_cli(paths: &CliPaths) -> Result<Self> {
        Self::new_with_paths(
            &paths.config_path,
            paths.data_dir.as_deref(),
            paths.logs_dir.as_deref(),
        )
    }

    /// `data_dir` overrides the configured data directory for this run. Logs
    /// default to `<data>/logs`.
    pub fn new_with_paths(
        config_path: &Path,
        data_dir: Option<&Path>,
        logs_dir: Option<&Path>,
    ) -> Result<Self> {
        let mut config = Config::load_or_default(config_path)?;
        if let Some(dir) = data_dir {
            config.override_data_dir(dir);
        }
        let data_dir = config.data_dir();
        let logs_dir = logs_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join(LOGS_DIR));

        let logger = Logger::with_log_dir(&logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());

        Ok(Self {
            profiles: ProfileStore::new(&data_dir),
            schedules: ScheduleStore::new(&data_dir),
            tasks: TaskStore::new(&data_dir),
            config,
            logger,
            data_dir,
            logs_dir,
        })
    }
}
