//! Division page use-case service.
//!
//! # Responsibility
//! - Gate the request, then load the three feeds of one division through the
//!   feed cache.
//! - Run normalize/classify/aggregate and assemble a `DivisionPage`.
//! - Surface data problems as page warnings or typed errors.
//!
//! # Invariants
//! - No feed is fetched for a request the gate rejects.
//! - Panels are numbered consecutively: numeric first, then textual, each in
//!   definition order.
//! - A results UID without a definition fails the whole page.

use crate::access::{AccessError, AccessGate, AllowList, Identity, RequestContext};
use crate::config::{ConfigError, ConfigResult, DashboardConfig, DivisionConfig};
use crate::ingest::classify::classify;
use crate::ingest::normalize::{
    normalize_definitions, normalize_memos, normalize_observations, DataIntegrityError,
};
use crate::ingest::trim_columns;
use crate::memo::{select_memos, MemoSection};
use crate::model::indicator::IndicatorDefinition;
use crate::model::observation::ObservationRecord;
use crate::model::row::RawRow;
use crate::report::cutoff::CutoffPolicy;
use crate::report::format::{unit_label, yearly_goal_label, EMPTY_CARDS_MESSAGE};
use crate::report::numeric::{summarize_numeric, NumericSummary};
use crate::report::series::{build_series, ChartSeries};
use crate::report::table::{numeric_table, textual_table, Table, TextualLayout};
use crate::report::textual::{build_cards, build_timeline, TextualTimeline, TimelineCard};
use crate::report::ReportPeriod;
use crate::source::cache::{CacheStatus, Clock, FeedCache, SystemClock};
use crate::source::{FeedError, FeedSource};
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Service error for page builds.
#[derive(Debug)]
pub enum DashboardError {
    /// Gate rejection; nothing was fetched.
    Access(AccessError),
    /// No division is configured under the requested slug.
    UnknownDivision(String),
    Feed(FeedError),
    DataIntegrity(DataIntegrityError),
    Config(ConfigError),
}

impl DashboardError {
    /// Blocking message shown to the viewer.
    pub fn user_message(&self) -> String {
        match self {
            Self::Access(err) => err.user_message().to_string(),
            Self::UnknownDivision(slug) => format!("존재하지 않는 본부입니다: {slug}"),
            Self::Feed(_) => "데이터를 불러오지 못했습니다. 잠시 후 다시 시도해 주세요.".to_string(),
            Self::DataIntegrity(DataIntegrityError::UndefinedUid { uids }) => {
                format!("목표 시트에 정의되지 않은 UID가 있습니다: {}", uids.join(", "))
            }
            Self::Config(_) => "대시보드 설정 오류입니다.".to_string(),
        }
    }
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access(err) => write!(f, "{err}"),
            Self::UnknownDivision(slug) => write!(f, "unknown division: `{slug}`"),
            Self::Feed(err) => write!(f, "{err}"),
            Self::DataIntegrity(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::Feed(err) => Some(err),
            Self::DataIntegrity(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::UnknownDivision(_) => None,
        }
    }
}

impl From<AccessError> for DashboardError {
    fn from(value: AccessError) -> Self {
        Self::Access(value)
    }
}

impl From<FeedError> for DashboardError {
    fn from(value: FeedError) -> Self {
        Self::Feed(value)
    }
}

impl From<DataIntegrityError> for DashboardError {
    fn from(value: DataIntegrityError) -> Self {
        Self::DataIntegrity(value)
    }
}

impl From<ConfigError> for DashboardError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Non-fatal data problem shown above the panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    /// Definition excluded because its kind tag is neither numeric nor textual.
    UnrecognizedKind { uid: String, name: String, tag: String },
    /// A feed refresh failed and an expired copy was served.
    StaleFeed { feed: String },
}

/// Navigation entry for one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivisionLink {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericPanel {
    /// 1-based position on the page.
    pub ordinal: usize,
    pub title: String,
    pub unit_label: String,
    pub yearly_goal_label: String,
    pub summary: NumericSummary,
    pub table: Table,
    pub series: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextualPanel {
    pub ordinal: usize,
    pub title: String,
    pub timeline: TextualTimeline,
    pub table: Table,
    pub cards: Vec<TimelineCard>,
    /// Shown instead of the cards when no month has a record.
    pub empty_message: Option<String>,
}

/// Everything the presentation layer needs for one division page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionPage {
    pub slug: String,
    pub title: String,
    pub viewer_name: String,
    pub period: ReportPeriod,
    pub cutoff_policy: CutoffPolicy,
    pub textual_layout: TextualLayout,
    pub numeric: Vec<NumericPanel>,
    pub textual: Vec<TextualPanel>,
    pub memos: MemoSection,
    pub warnings: Vec<DataWarning>,
}

impl DivisionPage {
    pub fn panel_count(&self) -> usize {
        self.numeric.len() + self.textual.len()
    }
}

/// Dashboard facade over a feed source.
pub struct DashboardService<S, C = SystemClock> {
    config: DashboardConfig,
    allow_list: Arc<AllowList>,
    cache: FeedCache<S, C>,
}

impl<S: FeedSource> DashboardService<S, SystemClock> {
    /// Creates a service after validating `config`.
    pub fn new(config: DashboardConfig, source: S) -> ConfigResult<Self> {
        Self::with_clock(config, source, SystemClock)
    }
}

impl<S: FeedSource, C: Clock> DashboardService<S, C> {
    pub fn with_clock(config: DashboardConfig, source: S, clock: C) -> ConfigResult<Self> {
        config.validate()?;
        let allow_list = Arc::new(config.allow_list());
        let cache = FeedCache::with_clock(source, config.cache_settings(), clock);
        Ok(Self {
            config,
            allow_list,
            cache,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn cache(&self) -> &FeedCache<S, C> {
        &self.cache
    }

    /// Builds a request context sharing this service's allow-list.
    pub fn request_context(&self, identity: Option<Identity>, today: NaiveDate) -> RequestContext {
        RequestContext::new(identity, Arc::clone(&self.allow_list), today)
    }

    /// Configured divisions in declaration order.
    pub fn division_index(&self) -> Vec<DivisionLink> {
        self.config
            .divisions
            .iter()
            .map(|division| DivisionLink {
                slug: division.slug.clone(),
                title: division.title.clone(),
            })
            .collect()
    }

    /// Builds the page of division `slug` for the request in `context`.
    pub fn build_division_page(
        &self,
        context: &RequestContext,
        slug: &str,
    ) -> DashboardResult<DivisionPage> {
        let started_at = Instant::now();
        let viewer = AccessGate::check(context)?;
        let division = self
            .config
            .division(slug)
            .ok_or_else(|| DashboardError::UnknownDivision(slug.to_string()))?;
        let period = ReportPeriod::from_date(context.today);

        let mut warnings = Vec::new();
        let target_rows = self.load_feed("targets", &division.feeds.targets, &mut warnings)?;
        let result_rows = self.load_feed("results", &division.feeds.results, &mut warnings)?;
        let memo_rows = self.load_feed("memos", &division.feeds.memos, &mut warnings)?;

        let definitions = normalize_definitions(&target_rows);
        let records = normalize_observations(&result_rows);
        if let Err(err) = definitions.check_integrity(&records) {
            warn!(
                "event=page_build_failed module=service division={} reason=data_integrity",
                division.slug
            );
            return Err(err.into());
        }

        let classification = classify(&definitions);
        warnings.extend(classification.unrecognized.iter().map(|item| {
            DataWarning::UnrecognizedKind {
                uid: item.uid.clone(),
                name: item.name.clone(),
                tag: item.tag.clone(),
            }
        }));

        let numeric: Vec<NumericPanel> = classification
            .numeric
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                numeric_panel(index + 1, definition, &records, division, period.month)
            })
            .collect();
        let offset = numeric.len();
        let textual: Vec<TextualPanel> = classification
            .textual
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                textual_panel(offset + index + 1, definition, &records, division, period.month)
            })
            .collect();

        let memos = normalize_memos(&memo_rows);
        let selected = select_memos(&memos, period.year, period.month, &division.memo_token)
            .into_iter()
            .cloned()
            .collect();

        let page = DivisionPage {
            slug: division.slug.clone(),
            title: division.title.clone(),
            viewer_name: viewer.name.clone(),
            period,
            cutoff_policy: division.cutoff_policy,
            textual_layout: division.textual_layout,
            numeric,
            textual,
            memos: MemoSection::new(period.year, period.month, selected),
            warnings,
        };

        info!(
            "event=page_built module=service status=ok division={} panels={} memos={} warnings={} duration_ms={}",
            page.slug,
            page.panel_count(),
            page.memos.entries.len(),
            page.warnings.len(),
            started_at.elapsed().as_millis()
        );
        Ok(page)
    }

    fn load_feed(
        &self,
        feed: &str,
        handle: &str,
        warnings: &mut Vec<DataWarning>,
    ) -> DashboardResult<Vec<RawRow>> {
        let read = self.cache.get(handle)?;
        if read.status == CacheStatus::Stale {
            warnings.push(DataWarning::StaleFeed {
                feed: feed.to_string(),
            });
        }
        Ok(trim_columns(&read.rows))
    }
}

fn panel_title(ordinal: usize, definition: &IndicatorDefinition) -> String {
    format!("{ordinal}. {}", definition.name)
}

fn numeric_panel(
    ordinal: usize,
    definition: &IndicatorDefinition,
    records: &[ObservationRecord],
    division: &DivisionConfig,
    current_month: u32,
) -> NumericPanel {
    let summary = summarize_numeric(definition, records, division.cutoff_policy, current_month);
    NumericPanel {
        ordinal,
        title: panel_title(ordinal, definition),
        unit_label: unit_label(&definition.unit),
        yearly_goal_label: yearly_goal_label(summary.yearly_goal, &definition.unit),
        table: numeric_table(&summary),
        series: build_series(&definition.uid, &definition.unit, records),
        summary,
    }
}

fn textual_panel(
    ordinal: usize,
    definition: &IndicatorDefinition,
    records: &[ObservationRecord],
    division: &DivisionConfig,
    current_month: u32,
) -> TextualPanel {
    let timeline = build_timeline(definition, records);
    let cards = build_cards(&timeline, current_month);
    TextualPanel {
        ordinal,
        title: panel_title(ordinal, definition),
        table: textual_table(&timeline, division.textual_layout, current_month),
        empty_message: cards
            .is_empty()
            .then(|| EMPTY_CARDS_MESSAGE.to_string()),
        cards,
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardError, DataWarning};
    use crate::access::AccessError;
    use crate::ingest::normalize::DataIntegrityError;

    #[test]
    fn user_messages_follow_error_kind() {
        let access = DashboardError::from(AccessError::LoginRequired);
        assert!(access.user_message().contains("로그인 필요"));

        let integrity = DashboardError::from(DataIntegrityError::UndefinedUid {
            uids: vec!["X9".to_string()],
        });
        assert!(integrity.user_message().ends_with("X9"));
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let warning = DataWarning::StaleFeed {
            feed: "results".to_string(),
        };
        let value = serde_json::to_value(&warning).expect("serialize warning");
        assert_eq!(value["kind"], "stale_feed");
        assert_eq!(value["feed"], "results");
    }
}
