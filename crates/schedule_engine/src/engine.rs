use std::path::PathBuf;
use std::sync::Arc;

use bot_logging::{bot_error, bot_info, bot_warn};
use tokio::sync::Mutex;

use crate::cache::{CacheError, ScheduleCache};
use crate::decode::decode_html;
use crate::fetch::{FetchSettings, Fetcher, ProgressSink, ReqwestFetcher, ScheduleRequest};
use crate::message::RenderedMessage;
use crate::render::render_document;
use crate::{FetchError, FetchProgress, Stage};

pub const DEFAULT_SCHEDULE_URL: &str = "http://inet.ibi.spb.ru/raspisan/rasp.php";
pub const MISSING_SOURCE_TEXT: &str = "Файл с расписанием не найден.";

/// Everything the pipeline needs to know about where schedules come from
/// and where the last one is kept.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub schedule_url: String,
    pub group_id: String,
    pub cache_path: PathBuf,
    /// Extra copy of every raw response, for looking at what the server sent.
    pub debug_copy_path: Option<PathBuf>,
    pub fetch: FetchSettings,
}

impl EngineConfig {
    pub fn default_with_cache(group_id: impl Into<String>, cache_path: PathBuf) -> Self {
        Self {
            schedule_url: DEFAULT_SCHEDULE_URL.to_string(),
            group_id: group_id.into(),
            cache_path,
            debug_copy_path: None,
            fetch: FetchSettings::default(),
        }
    }
}

/// Failure of a fetch-store-render cycle.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("{0}")]
    Cache(#[from] CacheError),
}

/// Entry points of the schedule pipeline.
///
/// Reads and writes of the cached page go through one async lock, so a
/// render never observes a page another request is still storing.
pub struct ScheduleEngine {
    config: EngineConfig,
    fetcher: Arc<dyn Fetcher>,
    cache: Mutex<ScheduleCache>,
}

impl ScheduleEngine {
    pub fn new(config: EngineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let cache = ScheduleCache::new(config.cache_path.clone(), config.debug_copy_path.clone());
        Self {
            config,
            fetcher,
            cache: Mutex::new(cache),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render the cached page.
    ///
    /// Never fails: a missing page and read errors become notices.
    pub async fn render_cached(&self) -> RenderedMessage {
        let cache = self.cache.lock().await;
        match cache.load() {
            Ok(html) => render_document(&html),
            Err(CacheError::Missing(path)) => {
                bot_error!("cached schedule not found at {:?}", path);
                RenderedMessage::notice(MISSING_SOURCE_TEXT)
            }
            Err(err) => {
                bot_error!("failed to render cached schedule: {}", err);
                RenderedMessage::notice(format!("Произошла ошибка при парсинге: {err}"))
            }
        }
    }

    /// Fetch the schedule for `date_from..=date_to`, replace the cached page
    /// and render it.
    pub async fn fetch_and_render(
        &self,
        date_from: &str,
        date_to: &str,
        sink: &dyn ProgressSink,
    ) -> Result<RenderedMessage, RefreshError> {
        let request = ScheduleRequest {
            url: self.config.schedule_url.clone(),
            group_id: self.config.group_id.clone(),
            date_from: date_from.to_string(),
            date_to: date_to.to_string(),
        };
        bot_info!(
            "fetching schedule for group {} from {} to {}",
            request.group_id,
            request.date_from,
            request.date_to
        );

        let output = self.fetcher.fetch(&request, sink).await.inspect_err(|err| {
            bot_warn!("schedule fetch failed: {}", err);
        })?;

        sink.emit(FetchProgress {
            stage: Stage::Decoding,
            bytes: Some(output.metadata.byte_len),
        });
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        bot_info!(
            "fetched {} bytes from {} ({})",
            output.metadata.byte_len,
            output.metadata.final_url,
            decoded.encoding_label
        );

        let cache = self.cache.lock().await;
        sink.emit(FetchProgress {
            stage: Stage::Storing,
            bytes: None,
        });
        cache.store(&decoded.html)?;

        sink.emit(FetchProgress {
            stage: Stage::Rendering,
            bytes: None,
        });
        let message = render_document(&decoded.html);
        drop(cache);

        sink.emit(FetchProgress {
            stage: Stage::Done,
            bytes: None,
        });
        Ok(message)
    }
}
