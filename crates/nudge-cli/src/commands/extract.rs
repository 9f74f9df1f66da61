//! One-shot extraction for inspecting pipeline behavior.

use super::build_extractor;
use anyhow::Result;
use nudge_core::extract::normalize::normalize_now;

pub async fn run(text: &str) -> Result<()> {
    let extractor = build_extractor();

    match extractor.extract(text).await {
        Ok(extraction) => {
            println!("description: {}", extraction.description);
            println!("time:        {}", normalize_now(&extraction.time_phrase));
            if !extraction.explanation.is_empty() {
                println!("note:        {}", extraction.explanation);
            }
            Ok(())
        }
        Err(err) => anyhow::bail!("extraction failed: {err}"),
    }
}
