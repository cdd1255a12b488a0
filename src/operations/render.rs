//! Document templates and rendering
//!
//! The request and deploy documents are plain-text templates whose `{{name}}`
//! placeholders are filled with either a direct field value or a fragment
//! from [`crate::operations::fragment`].

use crate::config::Config;
use crate::error::GenError;
use crate::operations::fragment;
use crate::operations::substitute::substitute_strict;
use core::fmt;
use std::collections::HashMap;
use tracing::debug;

/// Request template.
///
/// Guaranteed members such as `id` go last so that optional fragments above
/// them can always end with a comma.
pub const REQUEST_TEMPLATE: &str = r#"
{
    "requestType": {{requestType}},
    {{schedule}}
    {{owners}}
    "numRetriesOnFailure": {{numRetriesOnFailure}},
    "killOldNonLongRunningTasksAfterMillis": {{killOldNonLongRunningTasksAfterMillis}},
    {{requiredSlaveAttributes}}
    "scheduledExpectedRuntimeMillis": {{scheduledExpectedRuntimeMillis}},
    "id": {{requestId}}
}
"#;

/// Deploy template. Same ordering rule as [`REQUEST_TEMPLATE`].
pub const DEPLOY_TEMPLATE: &str = r#"
{
    "deploy": {
        {{command}}
        {{arguments}}
        {{env}}
        {{uris}}
        {{containerInfo}}
        {{resources}}
        "requestId": {{requestId}},
        "id": {{deployId}}
    }
}
"#;

/// Which of the two output documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DocumentKind {
    Request,
    Deploy,
}

impl DocumentKind {
    /// Every document produced by a run, in output order
    pub const ALL: [Self; 2] = [Self::Request, Self::Deploy];

    /// Fixed output file name
    #[must_use]
    #[inline]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Request => "singularity-request.json",
            Self::Deploy => "singularity-deploy.json",
        }
    }
}

impl fmt::Display for DocumentKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Request => f.write_str("request"),
            Self::Deploy => f.write_str("deploy"),
        }
    }
}

/// The pair of templates a run renders with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    request: String,
    deploy: String,
}

impl Templates {
    /// Use custom template text
    #[must_use]
    #[inline]
    pub fn new<R: Into<String>, D: Into<String>>(request: R, deploy: D) -> Self {
        Self {
            request: request.into(),
            deploy: deploy.into(),
        }
    }

    /// Template text for `kind`
    #[must_use]
    #[inline]
    pub fn get(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Request => &self.request,
            DocumentKind::Deploy => &self.deploy,
        }
    }
}

impl Default for Templates {
    #[inline]
    fn default() -> Self {
        Self::new(REQUEST_TEMPLATE, DEPLOY_TEMPLATE)
    }
}

/// Generated JSON text for one document
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub json: String,
}

impl RenderedDocument {
    #[must_use]
    #[inline]
    pub const fn new(kind: DocumentKind, json: String) -> Self {
        Self { kind, json }
    }

    #[must_use]
    #[inline]
    pub const fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.json.as_bytes()
    }
}

/// Render one document from `config`
///
/// Lines left blank by omitted fragments are dropped.
///
/// # Errors
///
/// Returns an error if:
/// - The template references a field that does not exist
/// - A record fragment cannot be serialized
#[inline]
pub fn render(
    templates: &Templates,
    kind: DocumentKind,
    config: &Config,
) -> Result<RenderedDocument, GenError> {
    let fields = template_fields(config)?;
    let filled = substitute_strict(templates.get(kind), &fields).map_err(|err| match err {
        GenError::Render { message } => {
            GenError::render(format!("Unable to render the {kind} template: {message}"))
        }
        other => other,
    })?;

    let mut json = filled
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    json.push('\n');

    debug!(document = %kind, %json, "Rendered JSON");
    Ok(RenderedDocument::new(kind, json))
}

/// Values for every placeholder the templates may use
///
/// Strings are quoted, numbers are raw, fragments are inserted as built.
fn template_fields(config: &Config) -> Result<HashMap<&'static str, String>, GenError> {
    Ok(HashMap::from([
        ("requestType", fragment::quote(&config.request_type)),
        ("requestId", fragment::quote(&config.request_id)),
        ("deployId", fragment::quote(&config.deploy_id)),
        (
            "numRetriesOnFailure",
            config.num_retries_on_failure.to_string(),
        ),
        (
            "killOldNonLongRunningTasksAfterMillis",
            config.kill_old_non_long_running_tasks_after_millis.to_string(),
        ),
        (
            "scheduledExpectedRuntimeMillis",
            config.scheduled_expected_runtime_millis.to_string(),
        ),
        ("schedule", fragment::schedule(config)),
        ("owners", fragment::owners(config)),
        (
            "requiredSlaveAttributes",
            fragment::required_slave_attributes(config),
        ),
        ("command", fragment::command(config)),
        ("arguments", fragment::arguments(config)),
        ("env", fragment::env(config)),
        ("uris", fragment::uris(config)),
        ("containerInfo", fragment::container_info(config)?),
        ("resources", fragment::resources(config)?),
    ]))
}
