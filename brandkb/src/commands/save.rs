//! Save command: the analysis → configuration → review wizard.

use anyhow::{Context, Result, anyhow};
use brandkb_core::{AnalysisResult, BrandTone, KnowledgeWizard, WizardStep};
use colored::Colorize;
use dialoguer::Confirm;
use std::path::Path;

use crate::commands::show::print_record;
use crate::config::Config;
use crate::context;

/// Execute save command.
pub async fn execute(analysis_path: &Path, tone: &str, yes: bool, config: &Config) -> Result<()> {
    let mut wizard = KnowledgeWizard::new();

    // Step 1: analysis
    print_progress(wizard.step());
    let analysis = read_analysis(analysis_path)?;
    let product_count = analysis.products.len();
    wizard.complete_analysis(analysis);
    println!(
        "{} Successfully analyzed {} products!",
        "✓".green(),
        product_count
    );

    // Step 2: brand tone
    print_progress(wizard.step());
    let tone = BrandTone::from_str(tone).ok_or_else(|| {
        anyhow!(
            "Unknown brand tone '{}'. Choose one of: {}",
            tone,
            BrandTone::ALL.map(|t| t.as_str()).join(", ")
        )
    })?;
    wizard.select_tone(tone)?;
    println!("{} Brand voice: {}", "✓".green(), tone.label().cyan());

    // Step 3: review
    print_progress(wizard.step());
    let record = wizard.finish()?;
    print_record(&record);
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Save this knowledge base?")
            .default(true)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("{} Not saved", "⚠".yellow());
            return Ok(());
        }
    }

    let ctx = context::open(config).await?;
    match ctx.store.save(record).await {
        Ok(saved) => {
            wizard.reset();
            println!("{} Knowledge base saved successfully!", "🎉".green());
            println!("  Timestamp: {}", saved.timestamp.dimmed());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn read_analysis(path: &Path) -> Result<AnalysisResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read analysis file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse analysis file {}", path.display()))
}

fn print_progress(current: WizardStep) {
    let line = WizardStep::ALL
        .iter()
        .map(|step| {
            let label = format!("{}. {}", step.index() + 1, step.title());
            if *step == current {
                label.bold().cyan().to_string()
            } else if *step < current {
                label.green().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" → ");
    println!();
    println!("{}  {}", line, current.description().dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_analysis_accepts_camel_case() {
        let temp = tempdir().expect("Failed to create temp dir");
        let path = temp.path().join("analysis.json");
        std::fs::write(
            &path,
            r#"{
                "brandName": "Acme",
                "products": [{"id": "p1", "name": "Anvil", "category": "Hardware"}],
                "categories": ["Hardware"],
                "mainKeywords": ["durable", "heavy"]
            }"#,
        )
        .unwrap();

        let analysis = read_analysis(&path).unwrap();
        assert_eq!(analysis.brand_name.as_deref(), Some("Acme"));
        assert_eq!(analysis.products.len(), 1);
        assert_eq!(analysis.main_keywords, vec!["durable", "heavy"]);
    }

    #[test]
    fn test_read_analysis_missing_file() {
        let temp = tempdir().expect("Failed to create temp dir");
        let err = read_analysis(&temp.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read analysis file"));
    }

    #[tokio::test]
    async fn test_execute_saves_with_yes() {
        let temp = tempdir().expect("Failed to create temp dir");
        let path = temp.path().join("analysis.json");
        std::fs::write(&path, r#"{"products": [], "categories": [], "mainKeywords": []}"#).unwrap();
        let config = Config {
            paths: crate::config::PathsConfig::under(temp.path().join("data")),
            ..Config::default()
        };

        execute(&path, "Humorous", true, &config).await.unwrap();

        let ctx = context::open(&config).await.unwrap();
        let current = ctx.store.current().await.unwrap();
        assert_eq!(current.brand_tone, BrandTone::Humorous);

        assert!(execute(&path, "grumpy", true, &config).await.is_err());
    }
}
