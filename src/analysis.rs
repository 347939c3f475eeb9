use futures_util::future::{join, join_all};
use serde::Serialize;
use std::fmt;

use crate::change::{Severity, SchemaSide};
use crate::config::{BaselineSource, Config};
use crate::describe::{Level, describe};
use crate::diff::diff_schemas;
use crate::fetch::ContentFetcher;
use crate::locate::locate;
use crate::schema::SchemaSnapshot;

/// The check-report consumer accepts at most this many annotations per
/// request, so results are handed out in chunks of this size.
pub const MAX_ANNOTATIONS_PER_BATCH: usize = 50;

/// A single line-addressed finding, shaped for the check report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub annotation_level: Level,
    pub title: String,
    pub message: String,
}

/// Outcome of comparing one configuration entry.
#[derive(Debug)]
pub struct AnalysisResult {
    pub schema_path: String,
    pub identical: bool,
    pub breaking: bool,
    pub annotations: Vec<Annotation>,
}

impl AnalysisResult {
    fn identical(schema_path: &str) -> Self {
        Self {
            schema_path: schema_path.to_string(),
            identical: true,
            breaking: false,
            annotations: Vec::new(),
        }
    }

    /// The check-run conclusion this result maps to.
    pub fn conclusion(&self) -> Conclusion {
        if self.breaking {
            Conclusion::ActionRequired
        } else if self.identical {
            Conclusion::Success
        } else {
            Conclusion::Neutral
        }
    }

    /// Annotations in report-sized chunks, in their original order.
    /// Concatenating the chunks reproduces `annotations` exactly.
    pub fn annotation_batches(&self) -> impl Iterator<Item = &[Annotation]> {
        self.annotations.chunks(MAX_ANNOTATIONS_PER_BATCH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    ActionRequired,
    Success,
    Neutral,
}

#[derive(Debug)]
pub enum AnalysisError {
    /// A required (ref, path) coordinate had no content.
    MissingSchema { reference: String, path: String },
    /// Fetched text is not a valid schema document.
    MalformedSchema {
        path: String,
        error: graphql_parser::schema::ParseError,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::MissingSchema { reference, path } => {
                write!(f, "could not find schema at '{reference}:{path}'")
            }
            AnalysisError::MalformedSchema { path, error } => {
                write!(f, "could not parse schema '{path}': {error}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Run one comparison per configuration entry, concurrently, and return
/// the outcomes in entry order. Entries are independent: one entry's
/// failure never suppresses the results of its siblings.
pub async fn analyze<F: ContentFetcher>(
    fetcher: &F,
    config: &Config,
    candidate_ref: &str,
) -> Vec<Result<AnalysisResult, AnalysisError>> {
    let entries = config
        .iter()
        .map(|(candidate_path, baseline)| {
            analyze_entry(fetcher, candidate_path, baseline, candidate_ref)
        })
        .collect::<Vec<_>>();

    join_all(entries).await
}

async fn analyze_entry<F: ContentFetcher>(
    fetcher: &F,
    candidate_path: &str,
    baseline: &BaselineSource,
    candidate_ref: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let (baseline_text, candidate_text) = join(
        fetcher.fetch(&baseline.reference, &baseline.schema_path),
        fetcher.fetch(candidate_ref, candidate_path),
    )
    .await;

    let Some(baseline_text) = baseline_text else {
        log::error!(
            "could not find the baseline schema at {}:{}",
            baseline.reference,
            baseline.schema_path
        );
        return Err(AnalysisError::MissingSchema {
            reference: baseline.reference.clone(),
            path: baseline.schema_path.clone(),
        });
    };
    let Some(candidate_text) = candidate_text else {
        log::error!("could not find the candidate schema at {candidate_ref}:{candidate_path}");
        return Err(AnalysisError::MissingSchema {
            reference: candidate_ref.to_string(),
            path: candidate_path.to_string(),
        });
    };

    if baseline_text == candidate_text {
        log::info!("{candidate_path}: no schema changes");
        return Ok(AnalysisResult::identical(candidate_path));
    }
    log::info!("{candidate_path}: schema changes detected");

    let baseline_snapshot = SchemaSnapshot::new(
        baseline_text,
        baseline.reference.clone(),
        baseline.schema_path.clone(),
    );
    let candidate_snapshot = SchemaSnapshot::new(candidate_text, candidate_ref, candidate_path);

    let baseline_doc =
        baseline_snapshot
            .parse()
            .map_err(|error| AnalysisError::MalformedSchema {
                path: baseline_snapshot.path.clone(),
                error,
            })?;
    let candidate_doc =
        candidate_snapshot
            .parse()
            .map_err(|error| AnalysisError::MalformedSchema {
                path: candidate_snapshot.path.clone(),
                error,
            })?;

    let diff = diff_schemas(&baseline_doc, &candidate_doc);

    let annotations: Vec<Annotation> = diff
        .iter()
        .map(|change| {
            match change.severity() {
                Severity::Breaking => log::warn!("{candidate_path}: {change}"),
                Severity::Dangerous => log::info!("{candidate_path}: {change}"),
            }
            let doc = match change.kind.locate_in() {
                SchemaSide::Baseline => &baseline_doc,
                SchemaSide::Candidate => &candidate_doc,
            };
            let span = locate(doc, &change.type_name, change.field_name.as_deref());
            let rendered = describe(change);
            Annotation {
                path: candidate_path.to_string(),
                start_line: span.start_line,
                end_line: span.end_line,
                annotation_level: rendered.level,
                title: rendered.title,
                message: rendered.message,
            }
        })
        .collect();

    // Derived from the annotations themselves, not tracked separately.
    let breaking = annotations
        .iter()
        .any(|a| a.annotation_level == Level::Failure);

    Ok(AnalysisResult {
        schema_path: candidate_path.to_string(),
        identical: false,
        breaking,
        annotations,
    })
}
