//! `/apply <request>`: hand `plan-<request>.md` to the executor role.

use std::path::{Path, PathBuf};

use {async_trait::async_trait, tracing::debug};

use crate::{builtin::APPLY, registry::render_template};

/// Runs a prompt as a given agent role. Implemented by the host.
#[async_trait]
pub trait PlanExecutor: Send + Sync {
    async fn execute(&self, agent: &str, prompt: &str) -> anyhow::Result<String>;
}

/// Result of looking up a plan file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanLookup {
    Missing { message: String },
    Found { path: PathBuf, content: String },
}

/// What `/apply` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// No usable plan; the executor was not called.
    Missing { message: String },
    /// The executor ran once with the plan attached.
    Executed { plan: PathBuf, response: String },
}

impl ApplyOutcome {
    /// Text shown to the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Missing { message } => message,
            Self::Executed { response, .. } => response,
        }
    }
}

pub fn plan_file_name(request: &str) -> String {
    format!("plan-{request}.md")
}

fn missing(request: &str) -> PlanLookup {
    PlanLookup::Missing {
        message: format!(
            "No plan file found for '{request}' (expected {}).",
            plan_file_name(request)
        ),
    }
}

/// A request names a file in `dir`, never a path.
fn is_plain_name(request: &str) -> bool {
    !request.is_empty() && !request.contains(['/', '\\']) && request != "." && request != ".."
}

/// Look up `<dir>/plan-<request>.md`.
///
/// A missing file, a directory in its place, an empty or whitespace-only file,
/// or a request that is not a plain file name all resolve to
/// [`PlanLookup::Missing`]. Other I/O errors, including content that is not
/// valid UTF-8, are returned.
pub async fn resolve_plan(dir: &Path, request: &str) -> loom_common::Result<PlanLookup> {
    if !is_plain_name(request) {
        return Ok(missing(request));
    }

    let path = dir.join(plan_file_name(request));
    if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
        debug!(path = %path.display(), "plan path is a directory");
        return Ok(missing(request));
    }
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "plan file not found");
            return Ok(missing(request));
        },
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        debug!(path = %path.display(), "plan file is empty");
        return Ok(missing(request));
    }
    Ok(PlanLookup::Found { path, content })
}

/// Prompt handed to the executor: the rendered command followed by the plan
/// content, verbatim.
pub fn plan_prompt(request: &str, content: &str) -> String {
    let mut prompt = render_template(APPLY.template, request);
    prompt.push_str(&format!(
        "\n<plan file=\"{}\">\n{content}\n</plan>\n",
        plan_file_name(request)
    ));
    prompt
}

/// Run `/apply <request>` against plans in `dir`.
///
/// Without a plan the executor is never invoked.
pub async fn apply(
    dir: &Path,
    request: &str,
    executor: &dyn PlanExecutor,
) -> anyhow::Result<ApplyOutcome> {
    let request = request.trim();
    match resolve_plan(dir, request).await? {
        PlanLookup::Missing { message } => Ok(ApplyOutcome::Missing { message }),
        PlanLookup::Found { path, content } => {
            debug!(plan = %path.display(), agent = APPLY.agent, "executing plan");
            let response = executor
                .execute(APPLY.agent, &plan_prompt(request, &content))
                .await?;
            Ok(ApplyOutcome::Executed {
                plan: path,
                response,
            })
        },
    }
}
