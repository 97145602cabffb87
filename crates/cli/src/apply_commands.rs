use std::path::Path;

use {
    anyhow::Result,
    async_trait::async_trait,
    loom_commands::{ApplyOutcome, PlanExecutor, apply},
};

/// Executor for the standalone binary: loom does not run models, so the
/// prompt for the exec agent is handed back for the host to run.
struct HandoffExecutor;

#[async_trait]
impl PlanExecutor for HandoffExecutor {
    async fn execute(&self, agent: &str, prompt: &str) -> Result<String> {
        Ok(format!("@{agent}\n\n{prompt}"))
    }
}

pub async fn handle_apply(dir: &Path, request: &str) -> Result<()> {
    let outcome = apply(dir, request, &HandoffExecutor).await?;
    if let ApplyOutcome::Executed { plan, .. } = &outcome {
        tracing::info!(plan = %plan.display(), "plan handed to exec");
    }
    println!("{}", outcome.message());
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handoff_prefixes_agent() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("plan-docs.md"), "1. Write docs.\n").unwrap();
        let outcome = apply(tmp.path(), "docs", &HandoffExecutor).await.unwrap();
        let text = outcome.message();
        assert!(text.starts_with("@exec\n\n"));
        assert!(text.contains("1. Write docs."));
    }
}
