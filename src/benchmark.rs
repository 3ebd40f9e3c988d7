//! Benchmark driver: score one or more ranking sources against a case set.

use crate::data::{load_cases, load_rankings};
use crate::error::Result;
use crate::metrics::{evaluate, SourceMetrics};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Scores for one named ranking source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub path: PathBuf,
    pub ranking_rows: usize,
    #[serde(flatten)]
    pub metrics: SourceMetrics,
}

/// Result of a benchmark run over every configured source.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub case_count: usize,
    pub sources: Vec<SourceReport>,
}

/// Load the cases once, then load and score each `(name, path)` source in turn.
pub fn run_benchmark(cases_path: &Path, sources: &[(String, PathBuf)]) -> Result<BenchmarkReport> {
    log::info!("Loading cases from {}", cases_path.display());
    let cases = load_cases(cases_path)?;
    log::info!("Loaded {} cases", cases.len());

    let mut reports = Vec::with_capacity(sources.len());
    for (name, path) in sources {
        log::info!("Scoring {} ({})", name, path.display());
        let entries = load_rankings(path)?;
        let metrics = evaluate(&cases, &entries)?;
        log::debug!(
            "{}: {} rows, true disease ranked for {}/{} cases",
            name,
            entries.len(),
            metrics.found,
            metrics.case_count
        );
        reports.push(SourceReport {
            name: name.clone(),
            path: path.clone(),
            ranking_rows: entries.len(),
            metrics,
        });
    }

    Ok(BenchmarkReport {
        case_count: cases.len(),
        sources: reports,
    })
}

/// Plain-text report, two decimals per metric.
pub fn render_text(report: &BenchmarkReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Number of cases: {}", report.case_count);
    let _ = writeln!(out);
    for source in &report.sources {
        let _ = writeln!(out, "{} performance:", source.name);
        let _ = writeln!(out, "  Top-1 accuracy: {:.2}", source.metrics.top1_accuracy);
        let _ = writeln!(out, "  MRR:            {:.2}", source.metrics.mrr);
        let _ = writeln!(
            out,
            "  Ranked at all:  {}/{}",
            source.metrics.found, source.metrics.case_count
        );
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElbenchError;
    use std::fs;
    use tempfile::TempDir;

    fn bundled_data() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn test_metrics_run_on_mock_data() {
        let data = bundled_data();
        let sources = vec![
            ("Exomiser (mock)".to_string(), data.join("exomiser_mock_results.csv")),
            ("LLM (mock)".to_string(), data.join("llm_mock_results.csv")),
        ];

        let report = run_benchmark(&data.join("cases.csv"), &sources).unwrap();

        assert!(report.case_count > 0);
        assert_eq!(report.sources.len(), 2);
        for source in &report.sources {
            assert!((0.0..=1.0).contains(&source.metrics.top1_accuracy));
            assert!((0.0..=1.0).contains(&source.metrics.mrr));
            assert!(source.metrics.top1_accuracy <= source.metrics.mrr);
        }
    }

    #[test]
    fn test_run_benchmark_known_values() {
        let temp_dir = TempDir::new().unwrap();
        let cases = temp_dir.path().join("cases.csv");
        let ranks = temp_dir.path().join("ranks.csv");
        fs::write(
            &cases,
            "case_id,phenotypes,true_disease\nC1,Tall,Marfan\nC2,Short,Noonan\n",
        )
        .unwrap();
        fs::write(
            &ranks,
            "case_id,rank,disease\nC1,2,Marfan\nC1,1,EDS\nC1,4,Marfan\nC2,1,Noonan\n",
        )
        .unwrap();

        let report = run_benchmark(&cases, &[("tool".to_string(), ranks.clone())]).unwrap();

        assert_eq!(report.case_count, 2);
        let source = &report.sources[0];
        assert_eq!(source.ranking_rows, 4);
        assert_eq!(source.metrics.found, 2);
        assert!((source.metrics.top1_accuracy - 0.5).abs() < 1e-9);
        assert!((source.metrics.mrr - 0.75).abs() < 1e-9);

        let text = render_text(&report);
        assert!(text.starts_with("Number of cases: 2\n"));
        assert!(text.contains("tool performance:"));
        assert!(text.contains("Top-1 accuracy: 0.50"));
        assert!(text.contains("MRR:            0.75"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["case_count"], 2);
        assert_eq!(json["sources"][0]["name"], "tool");
        assert_eq!(json["sources"][0]["mrr"], 0.75);
    }

    #[test]
    fn test_run_benchmark_invalid_rank() {
        let temp_dir = TempDir::new().unwrap();
        let cases = temp_dir.path().join("cases.csv");
        let ranks = temp_dir.path().join("ranks.csv");
        fs::write(&cases, "case_id,phenotypes,true_disease\nC1,Tall,Marfan\n").unwrap();
        fs::write(&ranks, "case_id,rank,disease\nC1,0,Marfan\n").unwrap();

        let err = run_benchmark(&cases, &[("tool".to_string(), ranks)]).unwrap_err();
        assert!(matches!(err, ElbenchError::InvalidRank { .. }));
    }

    #[test]
    fn test_run_benchmark_empty_cases() {
        let temp_dir = TempDir::new().unwrap();
        let cases = temp_dir.path().join("cases.csv");
        let ranks = temp_dir.path().join("ranks.csv");
        fs::write(&cases, "case_id,phenotypes,true_disease\n").unwrap();
        fs::write(&ranks, "case_id,rank,disease\nC1,1,Marfan\n").unwrap();

        let report = run_benchmark(&cases, &[("tool".to_string(), ranks)]).unwrap();
        assert_eq!(report.case_count, 0);
        assert_eq!(report.sources[0].metrics.top1_accuracy, 0.0);
        assert_eq!(report.sources[0].metrics.mrr, 0.0);
    }
}
